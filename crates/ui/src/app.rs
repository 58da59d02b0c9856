use std::time::Duration;

use eframe::egui;
use paintflash_core::{HighlightRegistry, Overlay, PaintflashConfig, RenderProfiler, Subscription};
use paintflash_protocol::Rect;
use tracing::debug;

use crate::renderer;
use crate::theme::ThemeMode;

/// Pretend components, each with an adjustable render cost in ms.
const COMPONENTS: [(&str, f32); 6] = [
    ("Header", 2.0),
    ("Sidebar", 6.0),
    ("Feed", 12.0),
    ("Chart", 25.0),
    ("Table", 18.0),
    ("Modal", 40.0),
];

struct DemoComponent {
    name: &'static str,
    cost_ms: f32,
    /// Where the card was laid out last frame.
    rect: Option<egui::Rect>,
}

/// Demo host: a panel of components whose "Render" buttons report a timed
/// render, with the highlight overlay painted on top.
pub struct PaintflashApp {
    profiler: RenderProfiler,
    overlay: Overlay,
    components: Vec<DemoComponent>,
    theme_mode: ThemeMode,
    last_painted: usize,
    _repaint: Subscription,
}

impl PaintflashApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &PaintflashConfig) -> Self {
        let theme_mode = ThemeMode::Dark;
        cc.egui_ctx.set_visuals(theme_mode.visuals());

        let registry = HighlightRegistry::new(config.registry_config());
        let overlay = Overlay::mount_with_style(&registry, config.overlay);

        // Wake the UI whenever the highlight set changes, including expiry.
        let ctx = cc.egui_ctx.clone();
        let repaint = registry.subscribe(move |_| ctx.request_repaint());

        Self {
            profiler: RenderProfiler::new(registry, config.render_thresholds()),
            overlay,
            components: COMPONENTS
                .iter()
                .map(|&(name, cost_ms)| DemoComponent {
                    name,
                    cost_ms,
                    rect: None,
                })
                .collect(),
            theme_mode,
            last_painted: 0,
            _repaint: repaint,
        }
    }

    fn component_card(&mut self, ui: &mut egui::Ui, index: usize) {
        let frame = egui::Frame::group(ui.style()).inner_margin(12.0);
        let response = frame
            .show(ui, |ui| {
                ui.set_min_size(egui::vec2(180.0, 90.0));
                let component = &mut self.components[index];
                ui.strong(component.name);
                ui.add(egui::Slider::new(&mut component.cost_ms, 0.5..=60.0).suffix(" ms"));
                let name = component.name;
                let clicked = ui.button("Render").clicked();
                if let Some(stats) = self.profiler.stats(name) {
                    ui.small(format!(
                        "{}x  worst {:.1}ms",
                        stats.renders,
                        stats.slowest.as_secs_f64() * 1000.0
                    ));
                }
                clicked
            });

        self.components[index].rect = Some(response.response.rect);
        if response.inner {
            self.render(index);
        }
    }

    /// Report one render of component `index` at its last laid-out rect.
    fn render(&mut self, index: usize) {
        let Some(component) = self.components.get(index) else {
            return;
        };
        let Some(rect) = component.rect else {
            debug!(component = component.name, "not laid out yet");
            return;
        };
        let cost = Duration::from_secs_f32(component.cost_ms / 1000.0);
        let class = self
            .profiler
            .record_render(component.name, cost, to_rect(rect));
        debug!(component = component.name, ?class, "render");
    }
}

fn to_rect(rect: egui::Rect) -> Rect {
    Rect::new(
        f64::from(rect.min.x),
        f64::from(rect.min.y),
        f64::from(rect.width()),
        f64::from(rect.height()),
    )
}

impl eframe::App for PaintflashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let registry = self.profiler.registry().clone();
        registry.tick();

        let mut render_all = false;

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("paintflash");
                ui.separator();

                let mut enabled = self.profiler.is_enabled();
                if ui.checkbox(&mut enabled, "Profiling").changed() {
                    self.profiler.set_enabled(enabled);
                }
                render_all = ui.button("Render all").clicked();
                if ui.button("Clear").clicked() {
                    registry.clear();
                }
                if ui.button("Reset stats").clicked() {
                    self.profiler.reset();
                }

                ui.separator();

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "Dark",
                    ThemeMode::Light => "Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(self.theme_mode.visuals());
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} active | {} painted | {} ms display",
                    self.overlay.snapshot().len(),
                    self.last_painted,
                    registry.display_duration().as_millis(),
                ));
                if let Some((name, stats)) = self.profiler.slowest_components().first() {
                    ui.separator();
                    ui.label(format!(
                        "slowest: {name} {:.1}ms",
                        stats.slowest.as_secs_f64() * 1000.0
                    ));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for index in 0..self.components.len() {
                    self.component_card(ui, index);
                }
            });
        });

        if render_all {
            for index in 0..self.components.len() {
                self.render(index);
            }
        }

        let commands = self.overlay.render(registry.now());
        let painter = renderer::overlay_painter(ctx);
        self.last_painted =
            renderer::paint_commands(&painter, &commands, egui::Pos2::ZERO, self.theme_mode);

        if self.overlay.is_animating() {
            ctx.request_repaint();
        } else if let Some(deadline) = registry.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(registry.now()));
        }
    }
}
