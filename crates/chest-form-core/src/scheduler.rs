//! Tick-based deferral of form work.
//!
//! The client needs a few ticks to materialize the fake chest before it will
//! accept ContainerOpen, and callbacks run only after the chest is gone.

use std::sync::Arc;

use crate::form::ChestForm;
use crate::host::PlayerId;
use crate::registry::PresentedForm;

/// Work that runs once its delay elapses.
#[derive(Debug, Clone)]
pub enum DeferredTask {
    /// Send ContainerOpen and record the form as presented.
    OpenContainer {
        player: PlayerId,
        presented: PresentedForm,
    },
    /// Run a slot handler after teardown.
    InvokeCallback {
        player: PlayerId,
        form: Arc<ChestForm>,
        slot: usize,
    },
}

impl DeferredTask {
    pub fn player(&self) -> PlayerId {
        match self {
            DeferredTask::OpenContainer { player, .. } => *player,
            DeferredTask::InvokeCallback { player, .. } => *player,
        }
    }
}

#[derive(Debug)]
struct ScheduledTask {
    remaining_ticks: u64,
    task: DeferredTask,
}

#[derive(Debug, Default)]
pub struct TickScheduler {
    tasks: Vec<ScheduledTask>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire on the `delay_ticks`-th following tick. A zero
    /// delay fires on the next tick.
    pub fn schedule(&mut self, delay_ticks: u64, task: DeferredTask) {
        self.tasks.push(ScheduledTask {
            remaining_ticks: delay_ticks,
            task,
        });
    }

    /// Advance one tick and return the tasks that fired, in scheduling order.
    pub fn tick(&mut self) -> Vec<DeferredTask> {
        let mut fired = Vec::new();
        let mut waiting = Vec::with_capacity(self.tasks.len());
        for mut scheduled in self.tasks.drain(..) {
            if scheduled.remaining_ticks > 0 {
                scheduled.remaining_ticks -= 1;
            }
            if scheduled.remaining_ticks == 0 {
                fired.push(scheduled.task);
            } else {
                waiting.push(scheduled);
            }
        }
        self.tasks = waiting;
        fired
    }

    /// Drop every pending task matching `pred`. Returns how many were dropped.
    pub fn cancel<P>(&mut self, pred: P) -> usize
    where
        P: Fn(&DeferredTask) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|t| !pred(&t.task));
        before - self.tasks.len()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
