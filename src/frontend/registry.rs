//! Element-level bookkeeping for one-shot reveals.

use super::dom;
use crate::reveal::{RevealId, RevealTracker, RevealTrigger};
use crate::scheduler::{FrameScheduler, FrameTask, TaskStatus};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use yew::{Callback, NodeRef};

pub const REVEALED_CLASS: &str = "is-revealed";

/// What happens when a registered element first satisfies its trigger.
pub enum RevealAction {
    Mark,
    Notify(Callback<f64>),
}

struct Entry {
    node: NodeRef,
    action: RevealAction,
}

#[derive(Default)]
struct RegistryInner {
    tracker: RefCell<RevealTracker>,
    entries: RefCell<HashMap<RevealId, Entry>>,
    sweep_queued: Cell<bool>,
    sweep_task: RefCell<Option<FrameTask>>,
}

#[derive(Clone, Default)]
pub struct RevealRegistry {
    inner: Rc<RegistryInner>,
}

impl PartialEq for RevealRegistry {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl RevealRegistry {
    pub fn register(&self, node: NodeRef, trigger: RevealTrigger, action: RevealAction) -> RevealGuard {
        let id = self.inner.tracker.borrow_mut().register(trigger);
        self.inner.entries.borrow_mut().insert(id, Entry { node, action });
        RevealGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Coalesces any number of requests into one sweep on the next frame.
    pub fn request_sweep(&self, frames: &FrameScheduler) {
        if self.inner.sweep_queued.replace(true) {
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let task = frames.register(move |now| {
            if let Some(inner) = weak.upgrade() {
                inner.sweep_queued.set(false);
                sweep(&inner, now);
            }
            TaskStatus::Done
        });
        *self.inner.sweep_task.borrow_mut() = Some(task);
    }
}

fn sweep(inner: &RegistryInner, now: f64) {
    let (_, viewport_height) = dom::viewport_size();
    let revealed = {
        let entries = inner.entries.borrow();
        inner.tracker.borrow_mut().sweep(viewport_height, |id| {
            entries
                .get(&id)
                .and_then(|entry| dom::vertical_bounds(&entry.node))
        })
    };
    if !revealed.is_empty() {
        log::debug!(
            "revealed {} element(s), {} pending",
            revealed.len(),
            inner.tracker.borrow().pending_count()
        );
    }

    for id in revealed {
        let entry = inner.entries.borrow_mut().remove(&id);
        let Some(entry) = entry else {
            continue;
        };
        match entry.action {
            RevealAction::Mark => dom::add_class(&entry.node, REVEALED_CLASS),
            RevealAction::Notify(callback) => callback.emit(now),
        }
    }
}

/// Unregisters the element when its component unmounts.
pub struct RevealGuard {
    id: RevealId,
    registry: Weak<RegistryInner>,
}

impl Drop for RevealGuard {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        inner.tracker.borrow_mut().unregister(self.id);
        let entry = inner.entries.borrow_mut().remove(&self.id);
        drop(entry);
    }
}
