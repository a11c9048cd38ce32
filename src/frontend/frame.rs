//! Binds a [`FrameScheduler`] to `requestAnimationFrame`.

use crate::scheduler::{FrameScheduler, FrameTask, TaskStatus};
use gloo_render::{request_animation_frame, AnimationFrame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct LoopShared {
    scheduler: FrameScheduler,
    pending: RefCell<Option<AnimationFrame>>,
}

/// Requests frames only while the scheduler has work. Dropping the loop
/// cancels the pending frame and every registered task.
pub struct FrameLoop {
    shared: Rc<LoopShared>,
}

impl FrameLoop {
    pub fn attach(scheduler: FrameScheduler) -> Self {
        let shared = Rc::new(LoopShared {
            scheduler: scheduler.clone(),
            pending: RefCell::new(None),
        });

        let weak = Rc::downgrade(&shared);
        scheduler.set_waker(move || {
            if let Some(shared) = weak.upgrade() {
                request_frame(&shared);
            }
        });

        if scheduler.has_tasks() {
            request_frame(&shared);
        }

        Self { shared }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.shared.scheduler.clear_waker();
        self.shared.scheduler.clear();
        self.shared.pending.borrow_mut().take();
    }
}

fn request_frame(shared: &Rc<LoopShared>) {
    if shared.pending.borrow().is_some() {
        return;
    }

    let weak = Rc::downgrade(shared);
    let handle = request_animation_frame(move |timestamp| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let fired = shared.pending.borrow_mut().take();
        drop(fired);

        shared.scheduler.run(timestamp);
        if shared.scheduler.has_tasks() {
            request_frame(&shared);
        }
    });
    *shared.pending.borrow_mut() = Some(handle);
}

/// At most one running task for an effect that sleeps between bursts of
/// input (a magnetic pull, a spring, a glide).
#[derive(Clone, Default)]
pub struct TaskSlot {
    running: Rc<Cell<bool>>,
    generation: Rc<Cell<u64>>,
    handle: Rc<RefCell<Option<FrameTask>>>,
}

impl TaskSlot {
    /// Registers `step` unless a task from this slot is still running.
    pub fn ensure(
        &self,
        frames: &FrameScheduler,
        mut step: impl FnMut(f64) -> TaskStatus + 'static,
    ) {
        if self.running.replace(true) {
            return;
        }

        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let running = self.running.clone();
        let current = self.generation.clone();
        let task = frames.register(move |now| {
            let status = step(now);
            // A cancelled task may still finish its last frame after a
            // replacement started.
            if status == TaskStatus::Done && current.get() == generation {
                running.set(false);
            }
            status
        });
        let finished = self.handle.borrow_mut().replace(task);
        drop(finished);
    }

    pub fn cancel(&self) {
        self.running.set(false);
        self.generation.set(self.generation.get() + 1);
        let task = self.handle.borrow_mut().take();
        drop(task);
    }
}
