//! Progress reporting for long-running catalog work.
//!
//! Progress is cosmetic: nothing in the catalog depends on it for
//! correctness.

/// Host-facing progress sink.
pub trait ProgressMonitor {
    /// Starts a task of `total_work` units.
    fn begin_task(&mut self, name: &str, total_work: u32);

    /// Reports `work` additional completed units.
    fn worked(&mut self, work: u32);

    /// Marks the task finished.
    fn done(&mut self);

    fn is_canceled(&self) -> bool {
        false
    }
}

/// Monitor that discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressMonitor;

impl ProgressMonitor for NullProgressMonitor {
    fn begin_task(&mut self, _name: &str, _total_work: u32) {}

    fn worked(&mut self, _work: u32) {}

    fn done(&mut self) {}
}

/// Child monitor that owns a fixed slice of its parent's task.
///
/// Whatever total the child declares is scaled onto `parent_ticks` units of
/// the parent. `done` settles any remainder, so the parent always receives
/// exactly `parent_ticks` once the child finishes.
pub struct SubProgressMonitor<'a> {
    parent: &'a mut dyn ProgressMonitor,
    parent_ticks: u32,
    total_work: u32,
    completed: u32,
    forwarded: u32,
}

impl<'a> SubProgressMonitor<'a> {
    pub fn new(parent: &'a mut dyn ProgressMonitor, parent_ticks: u32) -> Self {
        Self {
            parent,
            parent_ticks,
            total_work: 0,
            completed: 0,
            forwarded: 0,
        }
    }

    fn forward_up_to(&mut self, target: u32) {
        let target = target.min(self.parent_ticks);
        if target > self.forwarded {
            self.parent.worked(target - self.forwarded);
            self.forwarded = target;
        }
    }
}

impl ProgressMonitor for SubProgressMonitor<'_> {
    fn begin_task(&mut self, _name: &str, total_work: u32) {
        self.total_work = total_work;
        self.completed = 0;
    }

    fn worked(&mut self, work: u32) {
        if self.total_work == 0 {
            return;
        }
        self.completed = self.completed.saturating_add(work).min(self.total_work);
        let scaled =
            u64::from(self.parent_ticks) * u64::from(self.completed) / u64::from(self.total_work);
        self.forward_up_to(u32::try_from(scaled).unwrap_or(self.parent_ticks));
    }

    fn done(&mut self) {
        self.forward_up_to(self.parent_ticks);
    }

    fn is_canceled(&self) -> bool {
        self.parent.is_canceled()
    }
}
