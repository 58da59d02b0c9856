//! Fade curve shared by every highlight.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How completion of the fade is distributed over the display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Drops quickly at first, then lingers near transparent.
    EaseOutCubic,
}

impl Easing {
    /// Map linear time `t` in `[0, 1]` to fade completion in `[0, 1]`.
    /// Both curves are non-decreasing and fix the endpoints.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Remaining visibility of a highlight `elapsed` into a `duration`-long
/// window: `1.0` at insertion, exactly `0.0` once the window has passed.
pub fn fade_progress(elapsed: Duration, duration: Duration, easing: Easing) -> f32 {
    if duration.is_zero() || elapsed >= duration {
        return 0.0;
    }
    let t = elapsed.as_secs_f32() / duration.as_secs_f32();
    (1.0 - easing.apply(t)).clamp(0.0, 1.0)
}
