//! The highlight registry: single source of truth for what is currently
//! highlighted.
//!
//! # Lifecycle
//!
//! A highlight enters through [`HighlightRegistry::add`] and leaves in one
//! of four ways:
//!
//! 1. its removal timer fires during [`HighlightRegistry::tick`],
//! 2. a later `add` prunes it because it outlived the display window,
//! 3. a later `add` with the same id replaces it,
//! 4. [`HighlightRegistry::clear`].
//!
//! Exits 2 to 4 cancel the pending removal timer, so a timer only ever
//! fires for a highlight that is still present. Removal by id stays a
//! silent no-op regardless.
//!
//! # Notification
//!
//! Every mutation publishes a new immutable [`Snapshot`]; all listeners
//! receive the same value. Listeners run with the registry unborrowed and
//! may call back into it. Snapshots published from inside a listener are
//! queued and delivered once every listener has seen the current one, so
//! no listener observes generations out of order.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use paintflash_protocol::{ColorClass, HighlightId, Rect, SharedText};
use thiserror::Error;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::fade::Easing;
use crate::highlight::Highlight;
use crate::timers::{TimerKey, TimerQueue};

/// How long a highlight stays on screen unless configured otherwise.
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_millis(750);

#[derive(Debug, Error, PartialEq)]
pub enum HighlightError {
    #[error("highlight id is empty")]
    EmptyId,
    #[error("highlight {id} has no visible area: {rect:?}")]
    DegenerateRect { id: HighlightId, rect: Rect },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryConfig {
    pub display_duration: Duration,
    pub easing: Easing,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            display_duration: DEFAULT_DISPLAY_DURATION,
            easing: Easing::Linear,
        }
    }
}

/// Immutable view of the active highlights, oldest first.
///
/// Cloning shares the same allocation.
#[derive(Debug, Clone)]
pub struct Snapshot(Rc<[Highlight]>);

impl Snapshot {
    pub fn empty() -> Self {
        Self(Rc::from(Vec::new()))
    }

    /// Ids in paint order, mostly for assertions and logs.
    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|h| h.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Highlight> {
        self.0.iter().find(|h| h.id == id)
    }

    /// Whether both snapshots are the same published value.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Highlight>> for Snapshot {
    fn from(highlights: Vec<Highlight>) -> Self {
        Self(Rc::from(highlights))
    }
}

impl std::ops::Deref for Snapshot {
    type Target = [Highlight];

    fn deref(&self) -> &[Highlight] {
        &self.0
    }
}

type Listener = Rc<RefCell<dyn FnMut(&Snapshot)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListenerId(u64);

struct Inner {
    config: RegistryConfig,
    clock: Rc<dyn Clock>,
    highlights: Snapshot,
    timers: TimerQueue<HighlightId>,
    removal_timers: HashMap<HighlightId, TimerKey>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    delivering: bool,
    outbox: VecDeque<Snapshot>,
}

impl Inner {
    fn cancel_removal(&mut self, id: &str) {
        if let Some(key) = self.removal_timers.remove(id) {
            self.timers.cancel(key);
        }
    }

    fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }
}

/// Shared handle to one registry. Clones refer to the same registry.
///
/// Single-threaded by construction: the instrumentation hooks, the overlay
/// and the host's frame loop all run on the UI thread.
#[derive(Clone)]
pub struct HighlightRegistry {
    inner: Rc<RefCell<Inner>>,
}

impl std::fmt::Debug for HighlightRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("HighlightRegistry")
            .field("config", &inner.config)
            .field("highlights", &inner.highlights.ids())
            .field("pending_timers", &inner.timers.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl HighlightRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: RegistryConfig, clock: impl Clock + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                config,
                clock: Rc::new(clock),
                highlights: Snapshot::empty(),
                timers: TimerQueue::new(),
                removal_timers: HashMap::new(),
                listeners: Vec::new(),
                next_listener: 0,
                delivering: false,
                outbox: VecDeque::new(),
            })),
        }
    }

    /// Highlight `rect` for one display window.
    ///
    /// Input without a visible area or with an empty id is dropped silently;
    /// use [`HighlightRegistry::try_add`] to learn why.
    pub fn add(&self, id: impl Into<HighlightId>, rect: Rect, color: ColorClass) {
        if let Err(err) = self.insert(id.into(), rect, color, None) {
            debug!(%err, "highlight ignored");
        }
    }

    /// Like [`HighlightRegistry::add`], with a label painted in the corner.
    pub fn add_labeled(
        &self,
        id: impl Into<HighlightId>,
        rect: Rect,
        color: ColorClass,
        label: impl Into<SharedText>,
    ) {
        if let Err(err) = self.insert(id.into(), rect, color, Some(label.into())) {
            debug!(%err, "highlight ignored");
        }
    }

    pub fn try_add(
        &self,
        id: impl Into<HighlightId>,
        rect: Rect,
        color: ColorClass,
    ) -> Result<(), HighlightError> {
        self.insert(id.into(), rect, color, None)
    }

    fn insert(
        &self,
        id: HighlightId,
        rect: Rect,
        color: ColorClass,
        label: Option<SharedText>,
    ) -> Result<(), HighlightError> {
        if id.is_empty() {
            return Err(HighlightError::EmptyId);
        }
        if !rect.has_area() {
            return Err(HighlightError::DegenerateRect { id, rect });
        }

        let snapshot = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            let now = inner.clock.now();
            let RegistryConfig {
                display_duration,
                easing,
            } = inner.config;

            let previous = inner.highlights.clone();
            let mut next = Vec::with_capacity(previous.len() + 1);
            let mut pruned = 0usize;
            for highlight in previous.iter() {
                if highlight.is_expired(now) {
                    inner.cancel_removal(&highlight.id);
                    pruned += 1;
                } else if highlight.id == id {
                    inner.cancel_removal(&highlight.id);
                    debug!(%id, "replacing active highlight");
                } else {
                    next.push(highlight.clone());
                }
            }
            if pruned > 0 {
                debug!(pruned, "pruned expired highlights");
            }

            next.push(Highlight::new(
                id.clone(),
                rect,
                color,
                label,
                now,
                display_duration,
                easing,
            ));
            let key = inner.timers.schedule(now + display_duration, id.clone());
            inner.removal_timers.insert(id, key);

            inner.highlights = Snapshot::from(next);
            inner.highlights.clone()
        };

        self.publish(snapshot);
        Ok(())
    }

    /// Drop the highlight with this id. Absent ids are a silent no-op and
    /// publish nothing.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn remove(&self, id: &str) -> bool {
        self.retire(|h| h.id == id)
    }

    /// Drop every highlight matching `doomed` in one pass, cancelling their
    /// timers. Publishes a single snapshot, and only if something left.
    fn retire(&self, mut doomed: impl FnMut(&Highlight) -> bool) -> bool {
        let snapshot = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            let mut next = Vec::with_capacity(inner.highlights.len());
            let mut gone = Vec::new();
            for highlight in inner.highlights.iter() {
                if doomed(highlight) {
                    gone.push(highlight.id.clone());
                } else {
                    next.push(highlight.clone());
                }
            }
            if gone.is_empty() {
                return false;
            }
            for id in &gone {
                inner.cancel_removal(id);
            }
            trace!(removed = gone.len(), "highlights retired");
            inner.highlights = Snapshot::from(next);
            inner.highlights.clone()
        };

        self.publish(snapshot);
        true
    }

    /// Remove every highlight and cancel every pending timer. Always
    /// publishes, even when nothing was highlighted.
    pub fn clear(&self) {
        let snapshot = {
            let mut inner = self.inner.borrow_mut();
            inner.timers.clear();
            inner.removal_timers.clear();
            inner.highlights = Snapshot::empty();
            inner.highlights.clone()
        };
        debug!("cleared highlights");
        self.publish(snapshot);
    }

    /// Fire every removal timer that is due. Hosts call this once per frame.
    ///
    /// All expired highlights leave together, so subscribers get at most one
    /// snapshot per tick and never one that still holds an expired entry.
    /// Returns whether the collection changed.
    pub fn tick(&self) -> bool {
        let (now, fired) = {
            let mut inner = self.inner.borrow_mut();
            let now = inner.clock.now();
            let mut fired = Vec::new();
            while let Some(id) = inner.timers.pop_due(now) {
                inner.removal_timers.remove(id.as_str());
                fired.push(id);
            }
            (now, fired)
        };
        if !fired.is_empty() {
            trace!(fired = fired.len(), "removal timers fired");
        }
        self.retire(|h| h.is_expired(now) || fired.contains(&h.id))
    }

    /// Register a listener. It is called right away with the current
    /// collection, then after every change until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe(&self, listener: impl FnMut(&Snapshot) + 'static) -> Subscription {
        self.tick();

        let listener: Listener = Rc::new(RefCell::new(listener));
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = ListenerId(inner.next_listener);
            inner.next_listener += 1;
            inner.listeners.push((id, Rc::clone(&listener)));
            // Mid-delivery with newer snapshots queued: the delivery loop
            // hands them over in order, so catching up now would run ahead.
            let queued = inner.delivering && !inner.outbox.is_empty();
            (id, (!queued).then(|| inner.highlights.clone()))
        };
        trace!(listener = id.0, catch_up = current.is_some(), "subscribed");

        if let Some(current) = current
            && let Ok(mut f) = listener.try_borrow_mut()
        {
            (*f)(&current);
        }

        Subscription {
            registry: Rc::downgrade(&self.inner),
            id,
            active: true,
        }
    }

    fn publish(&self, snapshot: Snapshot) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.outbox.push_back(snapshot);
            if inner.delivering {
                return;
            }
            inner.delivering = true;
        }
        let _delivery = Delivery(&self.inner);

        loop {
            let (snapshot, listeners) = {
                let mut inner = self.inner.borrow_mut();
                let Some(snapshot) = inner.outbox.pop_front() else {
                    return;
                };
                let listeners: Vec<(ListenerId, Listener)> = inner
                    .listeners
                    .iter()
                    .map(|(id, l)| (*id, Rc::clone(l)))
                    .collect();
                (snapshot, listeners)
            };
            trace!(
                len = snapshot.len(),
                listeners = listeners.len(),
                "publishing snapshot"
            );

            for (id, listener) in listeners {
                // Unsubscribed by an earlier listener in this round.
                if !self.inner.borrow().has_listener(id) {
                    continue;
                }
                if let Ok(mut f) = listener.try_borrow_mut() {
                    (*f)(&snapshot);
                }
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.borrow().highlights.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().highlights.is_empty()
    }

    pub fn now(&self) -> Instant {
        self.inner.borrow().clock.now()
    }

    pub fn display_duration(&self) -> Duration {
        self.inner.borrow().config.display_duration
    }

    /// Earliest pending removal; hosts can sleep until then when idle.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.borrow().timers.next_deadline()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}

/// Ends a delivery round, also when a listener panics, so later changes
/// are not queued forever.
struct Delivery<'a>(&'a RefCell<Inner>);

impl Drop for Delivery<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.delivering = false;
            inner.outbox.clear();
        }
    }
}

impl Default for HighlightRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Weak<RefCell<Inner>>,
    id: ListenerId,
    active: bool,
}

impl Subscription {
    /// Deregister the listener. Calling it again does nothing.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let removed = {
            let mut inner = inner.borrow_mut();
            let position = inner.listeners.iter().position(|(id, _)| *id == self.id);
            position.map(|i| inner.listeners.remove(i))
        };
        trace!(listener = self.id.0, "unsubscribed");
        // The closure may own state whose drop touches the registry.
        drop(removed);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("listener", &self.id.0)
            .field("active", &self.active)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
