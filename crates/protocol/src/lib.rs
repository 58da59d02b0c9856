pub mod color_class;
pub mod commands;
pub mod id;
pub mod theme;
pub mod types;

pub use color_class::ColorClass;
pub use commands::RenderCommand;
pub use id::{HighlightId, SharedText};
pub use theme::ThemeToken;
pub use types::{Color, Rect};
