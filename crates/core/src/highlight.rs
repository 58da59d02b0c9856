use std::time::{Duration, Instant};

use paintflash_protocol::{ColorClass, HighlightId, Rect, SharedText};

use crate::fade::{Easing, fade_progress};

/// One timed, fading annotation over a component that just rendered.
///
/// Identity fields never change after creation. Visibility is derived from
/// the clock, so a snapshot handed to a subscriber stays valid while it
/// fades.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub id: HighlightId,
    pub rect: Rect,
    pub color: ColorClass,
    pub label: Option<SharedText>,
    pub created_at: Instant,
    display_duration: Duration,
    easing: Easing,
}

impl Highlight {
    pub(crate) fn new(
        id: HighlightId,
        rect: Rect,
        color: ColorClass,
        label: Option<SharedText>,
        created_at: Instant,
        display_duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            id,
            rect,
            color,
            label,
            created_at,
            display_duration,
            easing,
        }
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    pub fn expires_at(&self) -> Instant {
        self.created_at + self.display_duration
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.age(now) >= self.display_duration
    }

    /// Opacity driver: `1.0` at insertion, `0.0` at expiry.
    pub fn fade_progress(&self, now: Instant) -> f32 {
        fade_progress(self.age(now), self.display_duration, self.easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(created_at: Instant) -> Highlight {
        Highlight::new(
            "Header-1".into(),
            Rect::new(0.0, 0.0, 50.0, 20.0),
            ColorClass::Ok,
            None,
            created_at,
            Duration::from_millis(750),
            Easing::Linear,
        )
    }

    #[test]
    fn expires_exactly_at_display_duration() {
        let t0 = Instant::now();
        let h = highlight(t0);
        assert!(!h.is_expired(t0 + Duration::from_millis(749)));
        assert!(h.is_expired(t0 + Duration::from_millis(750)));
        assert_eq!(h.expires_at(), t0 + Duration::from_millis(750));
        assert_eq!(h.fade_progress(h.expires_at()), 0.0);
    }

    #[test]
    fn clock_before_creation_reads_as_fresh() {
        let t0 = Instant::now();
        let h = highlight(t0 + Duration::from_millis(10));
        assert_eq!(h.age(t0), Duration::ZERO);
        assert!((h.fade_progress(t0) - 1.0).abs() < f32::EPSILON);
    }
}
