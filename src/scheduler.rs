//! Central per-frame task scheduler.
//!
//! Every animation loop on the page registers a task here instead of
//! rescheduling itself. The browser driver calls [`FrameScheduler::run`]
//! once per animation frame and asks for another frame only while tasks
//! remain, so teardown is deterministic: drop the [`FrameTask`] handles (or
//! call [`FrameScheduler::clear`]) and nothing runs again.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Continue,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

type Task = Box<dyn FnMut(f64) -> TaskStatus>;

#[derive(Default)]
struct FrameTasks {
    entries: Vec<(TaskId, Task)>,
}

impl FrameTasks {
    fn insert(&mut self, id: TaskId, task: Task) {
        self.entries.push((id, task));
    }

    fn remove(&mut self, id: TaskId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    fn contains(&self, id: TaskId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Runs every task in registration order, dropping those that finish.
    fn run(&mut self, now_ms: f64) {
        self.entries
            .retain_mut(|(_, task)| task(now_ms) == TaskStatus::Continue);
    }
}

#[derive(Default)]
struct Inner {
    tasks: RefCell<FrameTasks>,
    incoming: RefCell<Vec<(TaskId, Task)>>,
    cancelled: RefCell<Vec<TaskId>>,
    next_id: Cell<u64>,
    waker: RefCell<Option<Rc<dyn Fn()>>>,
}

#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Rc<Inner>,
}

impl PartialEq for FrameScheduler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called whenever a task is registered, so an idle driver can request a
    /// frame.
    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.inner.waker.borrow_mut() = Some(Rc::new(waker));
    }

    pub fn clear_waker(&self) {
        self.inner.waker.borrow_mut().take();
    }

    /// Queues `task` for the next frame. Dropping the returned handle cancels
    /// it.
    #[must_use = "dropping the handle cancels the task"]
    pub fn register(&self, task: impl FnMut(f64) -> TaskStatus + 'static) -> FrameTask {
        let id = TaskId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.incoming.borrow_mut().push((id, Box::new(task)));

        let waker = self.inner.waker.borrow().clone();
        if let Some(waker) = waker {
            waker();
        }

        FrameTask {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Applies queued registrations and cancellations, then runs one frame.
    pub fn run(&self, now_ms: f64) {
        let cancelled = std::mem::take(&mut *self.inner.cancelled.borrow_mut());
        let mut incoming = std::mem::take(&mut *self.inner.incoming.borrow_mut());
        incoming.retain(|(id, _)| !cancelled.contains(id));

        let mut tasks = self.inner.tasks.borrow_mut();
        for id in cancelled {
            tasks.remove(id);
        }
        for (id, task) in incoming {
            tasks.insert(id, task);
        }
        tasks.run(now_ms);
    }

    pub fn has_tasks(&self) -> bool {
        if !self.inner.incoming.borrow().is_empty() {
            return true;
        }
        let cancelled = self.inner.cancelled.borrow();
        let tasks = self.inner.tasks.borrow();
        let live = tasks.ids().any(|id| !cancelled.contains(&id));
        live
    }

    /// Drops every task, running or queued.
    pub fn clear(&self) {
        self.inner.incoming.borrow_mut().clear();
        self.inner.cancelled.borrow_mut().clear();
        let drained = std::mem::take(&mut *self.inner.tasks.borrow_mut());
        drop(drained);
    }
}

/// Registration handle; cancels its task when dropped.
pub struct FrameTask {
    id: TaskId,
    scheduler: Weak<Inner>,
}

impl Drop for FrameTask {
    fn drop(&mut self) {
        let Some(inner) = self.scheduler.upgrade() else {
            return;
        };

        // While a frame is running the task list is borrowed; defer to the
        // next frame in that case.
        let removed_task = match inner.tasks.try_borrow_mut() {
            Ok(mut tasks) if tasks.contains(self.id) => {
                let position = tasks.entries.iter().position(|(id, _)| *id == self.id);
                position.map(|index| tasks.entries.remove(index))
            }
            Ok(_) => None,
            Err(_) => {
                inner.cancelled.borrow_mut().push(self.id);
                None
            }
        };
        drop(removed_task);

        let removed_incoming = match inner.incoming.try_borrow_mut() {
            Ok(mut incoming) => {
                let position = incoming.iter().position(|(id, _)| *id == self.id);
                position.map(|index| incoming.remove(index))
            }
            Err(_) => None,
        };
        drop(removed_incoming);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_task(counter: &Rc<Cell<u32>>, runs: u32) -> impl FnMut(f64) -> TaskStatus {
        let counter = counter.clone();
        move |_| {
            counter.set(counter.get() + 1);
            if counter.get() >= runs {
                TaskStatus::Done
            } else {
                TaskStatus::Continue
            }
        }
    }

    #[test]
    fn finished_tasks_are_removed() {
        let scheduler = FrameScheduler::new();
        let runs = Rc::new(Cell::new(0));
        let _task = scheduler.register(counter_task(&runs, 3));

        for frame in 0..10 {
            scheduler.run(f64::from(frame) * 16.0);
        }

        assert_eq!(runs.get(), 3);
        assert!(!scheduler.has_tasks());
    }

    #[test]
    fn dropping_the_handle_cancels() {
        let scheduler = FrameScheduler::new();
        let runs = Rc::new(Cell::new(0));
        let task = scheduler.register(counter_task(&runs, u32::MAX));

        scheduler.run(0.0);
        scheduler.run(16.0);
        drop(task);
        assert!(!scheduler.has_tasks());
        scheduler.run(32.0);

        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn cancelled_before_first_frame_never_runs() {
        let scheduler = FrameScheduler::new();
        let runs = Rc::new(Cell::new(0));
        drop(scheduler.register(counter_task(&runs, u32::MAX)));

        scheduler.run(0.0);
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn registration_during_a_frame_starts_next_frame() {
        let scheduler = FrameScheduler::new();
        let inner_runs = Rc::new(Cell::new(0));
        let spawned: Rc<RefCell<Option<FrameTask>>> = Rc::new(RefCell::new(None));

        let _outer = {
            let scheduler = scheduler.clone();
            let inner_runs = inner_runs.clone();
            let spawned = spawned.clone();
            scheduler.clone().register(move |_| {
                let task = scheduler.register(counter_task(&inner_runs, u32::MAX));
                *spawned.borrow_mut() = Some(task);
                TaskStatus::Done
            })
        };

        scheduler.run(0.0);
        assert_eq!(inner_runs.get(), 0);
        assert!(scheduler.has_tasks());

        scheduler.run(16.0);
        assert_eq!(inner_runs.get(), 1);
    }

    #[test]
    fn waker_fires_on_registration() {
        let scheduler = FrameScheduler::new();
        let wakes = Rc::new(Cell::new(0));
        {
            let wakes = wakes.clone();
            scheduler.set_waker(move || wakes.set(wakes.get() + 1));
        }

        let _first = scheduler.register(|_| TaskStatus::Continue);
        let _second = scheduler.register(|_| TaskStatus::Continue);
        assert_eq!(wakes.get(), 2);

        scheduler.clear_waker();
        let _third = scheduler.register(|_| TaskStatus::Continue);
        assert_eq!(wakes.get(), 2);
    }

    #[test]
    fn clear_drops_everything() {
        let scheduler = FrameScheduler::new();
        let runs = Rc::new(Cell::new(0));
        let _running = scheduler.register(counter_task(&runs, u32::MAX));
        scheduler.run(0.0);
        let _queued = scheduler.register(counter_task(&runs, u32::MAX));

        scheduler.clear();
        scheduler.run(16.0);

        assert_eq!(runs.get(), 1);
        assert!(!scheduler.has_tasks());
    }

    #[test]
    fn tasks_see_the_frame_time() {
        let scheduler = FrameScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _task = {
            let seen = seen.clone();
            scheduler.register(move |now| {
                seen.borrow_mut().push(now);
                TaskStatus::Continue
            })
        };

        scheduler.run(16.5);
        scheduler.run(33.0);
        assert_eq!(*seen.borrow(), vec![16.5, 33.0]);
    }
}
