use egui::{CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind};
use paintflash_core::overlay::OVERLAY_GROUP_ID;
use paintflash_protocol::{RenderCommand, ThemeToken};

use crate::theme::{self, ThemeMode};

const LABEL_FONT_SIZE: f32 = 11.0;
const LABEL_PADDING: f32 = 3.0;

/// Painter on the overlay's own foreground layer. The layer holds no
/// widgets, so pointer input falls through to whatever is underneath.
pub fn overlay_painter(ctx: &egui::Context) -> egui::Painter {
    ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new(OVERLAY_GROUP_ID),
    ))
}

/// Paint overlay commands. `offset` is the screen position of the
/// coordinate origin used for the highlight rects.
///
/// Returns the number of rects painted.
pub fn paint_commands(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) -> usize {
    let mut painted = 0;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                fill,
                outline,
                outline_width,
                label,
                opacity,
            } => {
                let egui_rect = Rect::from_min_size(
                    Pos2::new(rect.x as f32 + offset.x, rect.y as f32 + offset.y),
                    egui::vec2(rect.w as f32, rect.h as f32),
                );

                // Cull off-screen
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }

                if let Some(fill) = fill {
                    painter.rect_filled(
                        egui_rect,
                        CornerRadius::ZERO,
                        theme::resolve_faded(*fill, mode, *opacity),
                    );
                }

                if let Some(outline) = outline {
                    painter.rect_stroke(
                        egui_rect,
                        CornerRadius::ZERO,
                        Stroke::new(
                            *outline_width as f32,
                            theme::resolve_faded(*outline, mode, *opacity),
                        ),
                        StrokeKind::Inside,
                    );
                }

                if let Some(label) = label {
                    paint_label(painter, egui_rect, label, mode, *opacity);
                }
                painted += 1;
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // The whole layer is the group.
            }
        }
    }

    painted
}

/// Component name on a tab above the top-left corner.
fn paint_label(painter: &egui::Painter, rect: Rect, label: &str, mode: ThemeMode, opacity: f32) {
    let text_color = theme::resolve_faded(ThemeToken::HighlightLabelText, mode, opacity);
    let galley = painter.layout_no_wrap(
        label.to_string(),
        FontId::proportional(LABEL_FONT_SIZE),
        text_color,
    );
    let size = galley.size() + egui::vec2(LABEL_PADDING * 2.0, 0.0);
    let top = (rect.top() - size.y).max(painter.clip_rect().top());
    let tab = Rect::from_min_size(Pos2::new(rect.left(), top), size);
    painter.rect_filled(
        tab,
        CornerRadius::ZERO,
        theme::resolve_faded(ThemeToken::HighlightLabelBackground, mode, opacity),
    );
    painter.galley(
        tab.min + egui::vec2(LABEL_PADDING, 0.0),
        galley,
        text_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintflash_protocol::{ColorClass, Rect as HighlightRect};

    fn highlight(x: f64, opacity: f32) -> RenderCommand {
        RenderCommand::DrawRect {
            rect: HighlightRect::new(x, 40.0, 120.0, 60.0),
            fill: Some(ColorClass::Warn.fill_token()),
            outline: Some(ColorClass::Warn.outline_token()),
            outline_width: 2.0,
            label: Some("Feed".into()),
            opacity,
        }
    }

    fn paint(commands: &[RenderCommand]) -> usize {
        let ctx = egui::Context::default();
        let mut painted = 0;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = overlay_painter(ctx);
            painted = paint_commands(&painter, commands, Pos2::ZERO, ThemeMode::Dark);
        });
        painted
    }

    #[test]
    fn paints_every_visible_rect() {
        let commands = vec![
            RenderCommand::BeginGroup {
                id: OVERLAY_GROUP_ID.into(),
                label: None,
            },
            highlight(10.0, 1.0),
            highlight(200.0, 0.4),
            RenderCommand::EndGroup,
        ];
        assert_eq!(paint(&commands), 2);
    }

    #[test]
    fn culls_rects_outside_the_screen() {
        assert_eq!(paint(&[highlight(1.0e6, 1.0)]), 0);
    }

    #[test]
    fn overlay_layer_is_foreground() {
        let ctx = egui::Context::default();
        assert_eq!(overlay_painter(&ctx).layer_id().order, egui::Order::Foreground);
    }
}
