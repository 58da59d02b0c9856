//! egui host for paintflash: paints overlay commands on a foreground layer
//! above the rest of the UI.

mod app;
pub mod renderer;
pub mod theme;

pub use app::PaintflashApp;

use paintflash_core::PaintflashConfig;

/// Open a native window running the demo app.
pub fn run_native(config: PaintflashConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("paintflash")
            .with_inner_size([860.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "paintflash",
        options,
        Box::new(move |cc| Ok(Box::new(PaintflashApp::new(cc, &config)))),
    )
}
