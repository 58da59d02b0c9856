//! Ingress from render instrumentation.
//!
//! Whatever hooks component rendering reports each finished, measured
//! render here. Renders whose layout could not be measured are simply not
//! reported.

use std::collections::HashMap;
use std::time::Duration;

use paintflash_protocol::{ColorClass, Rect};
use tracing::trace;

use crate::registry::HighlightRegistry;
use crate::severity::RenderThresholds;

/// Running totals for one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub renders: u64,
    pub total: Duration,
    pub slowest: Duration,
    pub last_class: ColorClass,
}

impl RenderStats {
    pub fn mean(&self) -> Duration {
        match u32::try_from(self.renders) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total / n,
            Err(_) => Duration::from_secs_f64(self.total.as_secs_f64() / self.renders as f64),
        }
    }
}

#[derive(Debug)]
pub struct RenderProfiler {
    registry: HighlightRegistry,
    thresholds: RenderThresholds,
    enabled: bool,
    next_seq: u64,
    stats: HashMap<String, RenderStats>,
}

impl RenderProfiler {
    pub fn new(registry: HighlightRegistry, thresholds: RenderThresholds) -> Self {
        Self {
            registry,
            thresholds,
            enabled: true,
            next_seq: 0,
            stats: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &HighlightRegistry {
        &self.registry
    }

    pub fn thresholds(&self) -> RenderThresholds {
        self.thresholds
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling stops new highlights; active ones still fade out.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Record one render of `component` that took `duration` and now
    /// occupies `rect`. Returns the class it was highlighted with, or `None`
    /// while disabled.
    pub fn record_render(
        &mut self,
        component: &str,
        duration: Duration,
        rect: Rect,
    ) -> Option<ColorClass> {
        if !self.enabled {
            return None;
        }

        let class = self.thresholds.classify(duration);
        let stats = self
            .stats
            .entry(component.to_string())
            .or_insert(RenderStats {
                renders: 0,
                total: Duration::ZERO,
                slowest: Duration::ZERO,
                last_class: class,
            });
        stats.renders += 1;
        stats.total += duration;
        stats.slowest = stats.slowest.max(duration);
        stats.last_class = class;

        let id = format!("{component}-{}", self.next_seq);
        self.next_seq += 1;
        trace!(%id, ?duration, %class, "render recorded");
        self.registry.add_labeled(id, rect, class, component);
        Some(class)
    }

    pub fn stats(&self, component: &str) -> Option<&RenderStats> {
        self.stats.get(component)
    }

    /// Components ordered by slowest render, worst first.
    pub fn slowest_components(&self) -> Vec<(&str, &RenderStats)> {
        let mut all: Vec<_> = self.stats.iter().map(|(k, v)| (k.as_str(), v)).collect();
        all.sort_by(|a, b| b.1.slowest.cmp(&a.1.slowest).then_with(|| a.0.cmp(b.0)));
        all
    }

    /// Forget statistics and clear every highlight.
    pub fn reset(&mut self) {
        self.stats.clear();
        self.registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::registry::RegistryConfig;

    fn profiler() -> RenderProfiler {
        let registry =
            HighlightRegistry::with_clock(RegistryConfig::default(), ManualClock::new());
        RenderProfiler::new(registry, RenderThresholds::default())
    }

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 80.0, 20.0)
    }

    #[test]
    fn records_highlight_with_unique_ids() {
        let mut p = profiler();
        p.record_render("Button", Duration::from_millis(2), rect());
        p.record_render("Button", Duration::from_millis(40), rect());

        let snapshot = p.registry().snapshot();
        assert_eq!(snapshot.ids(), ["Button-0", "Button-1"]);
        assert_eq!(snapshot[1].color, ColorClass::Error);
        assert_eq!(snapshot[1].label.as_deref(), Some("Button"));
    }

    #[test]
    fn accumulates_stats() {
        let mut p = profiler();
        p.record_render("List", Duration::from_millis(10), rect());
        p.record_render("List", Duration::from_millis(20), rect());
        p.record_render("Row", Duration::from_millis(1), rect());

        let list = p.stats("List").copied();
        assert_eq!(list.map(|s| s.renders), Some(2));
        assert_eq!(list.map(|s| s.slowest), Some(Duration::from_millis(20)));
        assert_eq!(list.map(|s| s.mean()), Some(Duration::from_millis(15)));
        assert_eq!(list.map(|s| s.last_class), Some(ColorClass::Warn));

        let order: Vec<_> = p.slowest_components().iter().map(|(n, _)| *n).collect();
        assert_eq!(order, ["List", "Row"]);
    }

    #[test]
    fn disabled_profiler_adds_nothing() {
        let mut p = profiler();
        p.set_enabled(false);
        assert_eq!(p.record_render("Row", Duration::from_millis(1), rect()), None);
        assert!(p.registry().is_empty());
        assert!(p.stats("Row").is_none());
    }

    #[test]
    fn unmeasurable_layout_counts_but_does_not_highlight() {
        let mut p = profiler();
        let class = p.record_render("Hidden", Duration::from_millis(1), Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(class, Some(ColorClass::Ok));
        assert!(p.registry().is_empty());
        assert_eq!(p.stats("Hidden").map(|s| s.renders), Some(1));
    }

    #[test]
    fn reset_clears_everything() {
        let mut p = profiler();
        p.record_render("Row", Duration::from_millis(1), rect());
        p.reset();
        assert!(p.registry().is_empty());
        assert!(p.slowest_components().is_empty());
    }
}
