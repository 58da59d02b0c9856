//! Highlight lifecycle engine for paintflash.
//!
//! [`HighlightRegistry`] owns the timed, fading highlights reported by
//! render instrumentation; an [`Overlay`] subscribes to it and turns the
//! active highlights into [`RenderCommand`](paintflash_protocol::RenderCommand)s
//! for a host to paint.

pub mod clock;
pub mod config;
pub mod fade;
pub mod highlight;
pub mod overlay;
pub mod profiler;
pub mod registry;
pub mod severity;
pub mod svg;
pub mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, PaintflashConfig};
pub use fade::Easing;
pub use highlight::Highlight;
pub use overlay::{Overlay, OverlayStyle};
pub use profiler::{RenderProfiler, RenderStats};
pub use registry::{
    DEFAULT_DISPLAY_DURATION, HighlightError, HighlightRegistry, RegistryConfig, Snapshot,
    Subscription,
};
pub use severity::RenderThresholds;
