use std::time::Duration;

use paintflash_protocol::ColorClass;

/// One 60 fps frame.
pub const WARN_BUDGET: Duration = Duration::from_millis(16);
/// One 30 fps frame.
pub const ERROR_BUDGET: Duration = Duration::from_millis(33);

/// Render-duration budgets used to classify a render.
///
/// Under `warn` is fine, under `error` is slow, anything else drops frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderThresholds {
    pub warn: Duration,
    pub error: Duration,
}

impl Default for RenderThresholds {
    fn default() -> Self {
        Self {
            warn: WARN_BUDGET,
            error: ERROR_BUDGET,
        }
    }
}

impl RenderThresholds {
    pub fn classify(&self, duration: Duration) -> ColorClass {
        if duration < self.warn {
            ColorClass::Ok
        } else if duration < self.error {
            ColorClass::Warn
        } else {
            ColorClass::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_against_frame_budgets() {
        let t = RenderThresholds::default();
        assert_eq!(t.classify(Duration::from_millis(2)), ColorClass::Ok);
        assert_eq!(t.classify(Duration::from_millis(16)), ColorClass::Warn);
        assert_eq!(t.classify(Duration::from_millis(32)), ColorClass::Warn);
        assert_eq!(t.classify(Duration::from_millis(33)), ColorClass::Error);
        assert_eq!(t.classify(Duration::from_secs(1)), ColorClass::Error);
    }

    #[test]
    fn custom_budgets() {
        let t = RenderThresholds {
            warn: Duration::from_millis(4),
            error: Duration::from_millis(8),
        };
        assert_eq!(t.classify(Duration::from_millis(5)), ColorClass::Warn);
        assert_eq!(t.classify(Duration::from_millis(8)), ColorClass::Error);
    }
}
