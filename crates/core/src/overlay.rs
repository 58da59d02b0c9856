//! The overlay: turns the registry's latest snapshot into paint commands.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use paintflash_protocol::RenderCommand;
use serde::{Deserialize, Serialize};

use crate::registry::{HighlightRegistry, Snapshot, Subscription};

pub const OVERLAY_GROUP_ID: &str = "paintflash-overlay";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub outline_width: f64,
    pub show_labels: bool,
    /// Draw the faint tint under each outline.
    pub fill: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            outline_width: 2.0,
            show_labels: true,
            fill: true,
        }
    }
}

/// A mounted overlay. Holds its registry subscription for as long as it
/// lives; dropping it (or calling [`Overlay::unmount`]) releases it.
#[derive(Debug)]
pub struct Overlay {
    latest: Rc<RefCell<Snapshot>>,
    version: Rc<Cell<u64>>,
    style: OverlayStyle,
    subscription: Subscription,
}

impl Overlay {
    pub fn mount(registry: &HighlightRegistry) -> Self {
        Self::mount_with_style(registry, OverlayStyle::default())
    }

    pub fn mount_with_style(registry: &HighlightRegistry, style: OverlayStyle) -> Self {
        let latest = Rc::new(RefCell::new(Snapshot::empty()));
        let version = Rc::new(Cell::new(0));

        let (store, bump) = (Rc::clone(&latest), Rc::clone(&version));
        let subscription = registry.subscribe(move |snapshot| {
            *store.borrow_mut() = snapshot.clone();
            bump.set(bump.get() + 1);
        });

        Self {
            latest,
            version,
            style,
            subscription,
        }
    }

    pub fn unmount(mut self) {
        self.subscription.unsubscribe();
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }

    /// The snapshot this overlay will paint.
    pub fn snapshot(&self) -> Snapshot {
        self.latest.borrow().clone()
    }

    /// Number of snapshots delivered since mounting.
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// Whether anything is on screen, i.e. whether the host should keep
    /// scheduling frames.
    pub fn is_animating(&self) -> bool {
        !self.latest.borrow().is_empty()
    }

    pub fn style(&self) -> OverlayStyle {
        self.style
    }

    /// Paint commands for the current frame.
    ///
    /// Highlights are emitted oldest first so that newer ones paint on top.
    /// Returns nothing at all when no highlight is visible.
    pub fn render(&self, now: Instant) -> Vec<RenderCommand> {
        let latest = self.latest.borrow();
        let mut rects = Vec::with_capacity(latest.len());

        for highlight in latest.iter() {
            let opacity = highlight.fade_progress(now);
            if opacity <= 0.0 {
                continue;
            }
            rects.push(RenderCommand::DrawRect {
                rect: highlight.rect,
                fill: self.style.fill.then(|| highlight.color.fill_token()),
                outline: Some(highlight.color.outline_token()),
                outline_width: self.style.outline_width,
                label: if self.style.show_labels {
                    highlight.label.clone()
                } else {
                    None
                },
                opacity,
            });
        }

        if rects.is_empty() {
            return rects;
        }

        let mut commands = Vec::with_capacity(rects.len() + 2);
        commands.push(RenderCommand::BeginGroup {
            id: OVERLAY_GROUP_ID.into(),
            label: Some("Render highlights".into()),
        });
        commands.extend(rects);
        commands.push(RenderCommand::EndGroup);
        commands
    }
}
