//! SVG export: converts overlay `RenderCommand` lists into standalone SVG
//! strings, e.g. to attach a frame of highlights to a bug report.

use paintflash_protocol::{RenderCommand, ThemeToken};

/// Opacity of the fill tint relative to the outline.
const FILL_ALPHA: f32 = 0.15;
const LABEL_FONT_SIZE: f64 = 10.0;

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 200);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:10px">"#,
    ));

    let bg = resolve_color(ThemeToken::Background, dark);
    svg.push_str(&format!(r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#));

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
                let fill_attr = match fill {
                    Some(token) => format!(
                        r#"fill="{}" fill-opacity="{:.3}""#,
                        resolve_color(*token, dark),
                        FILL_ALPHA * opacity
                    ),
                    None => r#"fill="none""#.to_string(),
                };
                let stroke_attr = match outline {
                    Some(token) => format!(
                        r#" stroke="{}" stroke-width="{outline_width}" stroke-opacity="{opacity:.3}""#,
                        resolve_color(*token, dark),
                    ),
                    None => String::new(),
                };
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" {fill_attr}{stroke_attr}/>"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));

                if let Some(label) = label {
                    let text_color = resolve_color(ThemeToken::HighlightLabelText, dark);
                    svg.push_str(&format!(
                        r#"<text x="{}" y="{}" fill="{text_color}" fill-opacity="{opacity:.3}" font-size="{LABEL_FONT_SIZE}">{}</text>"#,
                        rect.x + 2.0,
                        rect.y + LABEL_FONT_SIZE,
                        escape_xml(label),
                    ));
                }
            }
            RenderCommand::BeginGroup { id, .. } => {
                svg.push_str(&format!(
                    r#"<g id="{}" style="pointer-events:none">"#,
                    escape_xml(id)
                ));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::HighlightOk | ThemeToken::HighlightOkFill => "#4caf50",
            ThemeToken::HighlightWarn | ThemeToken::HighlightWarnFill => "#ffa726",
            ThemeToken::HighlightError | ThemeToken::HighlightErrorFill => "#f44336",
            ThemeToken::HighlightLabelText | ThemeToken::TextPrimary => "#ececec",
            ThemeToken::HighlightLabelBackground | ThemeToken::Surface => "#202020",
            ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::Background => "#181818",
            ThemeToken::Border | ThemeToken::ComponentBorder => "#303030",
            ThemeToken::ComponentFill => "#242424",
        }
    } else {
        match token {
            ThemeToken::HighlightOk | ThemeToken::HighlightOkFill => "#27ae60",
            ThemeToken::HighlightWarn | ThemeToken::HighlightWarnFill => "#e67e22",
            ThemeToken::HighlightError | ThemeToken::HighlightErrorFill => "#e63946",
            ThemeToken::HighlightLabelText | ThemeToken::TextPrimary => "#1a1a2e",
            ThemeToken::HighlightLabelBackground | ThemeToken::Surface => "#f1f3f5",
            ThemeToken::TextMuted => "#666677",
            ThemeToken::Background => "#f8f9fa",
            ThemeToken::Border | ThemeToken::ComponentBorder => "#dee2e6",
            ThemeToken::ComponentFill => "#ffffff",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
