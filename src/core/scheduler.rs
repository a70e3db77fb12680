//! Cancellable timers on a single-threaded millisecond clock.
//!
//! Nothing runs on its own: the owner advances the clock and then drains
//! due tasks one at a time with [`Scheduler::pop_due`]. Handling one task
//! may cancel others, and a cancelled task never fires, even if it was
//! already due in the same advance.

/// What a scheduled task is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Autosave,
    EncounterCheck,
    EnemyTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct ScheduledTask {
    id: TaskId,
    kind: TaskKind,
    due_ms: u64,
    /// Repeat period; `None` for one-shot tasks.
    interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn insert(&mut self, kind: TaskKind, delay_ms: u64, interval_ms: Option<u64>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            kind,
            due_ms: self.now_ms.saturating_add(delay_ms),
            interval_ms,
        });
        id
    }

    /// Fires once after `delay_ms`.
    pub fn schedule_once(&mut self, kind: TaskKind, delay_ms: u64) -> TaskId {
        self.insert(kind, delay_ms, None)
    }

    /// Fires every `interval_ms` (at least 1 ms) until cancelled.
    pub fn schedule_repeating(&mut self, kind: TaskKind, interval_ms: u64) -> TaskId {
        let interval_ms = interval_ms.max(1);
        self.insert(kind, interval_ms, Some(interval_ms))
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Milliseconds until the task fires, if it is pending.
    pub fn remaining_ms(&self, id: TaskId) -> Option<u64> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, dt_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
    }

    /// Takes the earliest due task (ties by creation order).
    ///
    /// Repeating tasks are re-armed one interval after their due time, so a
    /// large advance fires them once per elapsed interval.
    pub fn pop_due(&mut self) -> Option<(TaskId, TaskKind)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= self.now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        let task = &mut self.tasks[index];
        let fired = (task.id, task.kind);
        if let Some(interval) = task.interval_ms {
            task.due_ms = task.due_ms.saturating_add(interval);
        } else {
            self.tasks.remove(index);
        }
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler) -> Vec<TaskKind> {
        std::iter::from_fn(|| scheduler.pop_due().map(|(_, kind)| kind)).collect()
    }

    #[test]
    fn test_once_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_once(TaskKind::EnemyTurn, 1000);

        scheduler.advance(999);
        assert!(drain(&mut scheduler).is_empty());

        scheduler.advance(1);
        assert_eq!(scheduler.pop_due(), Some((id, TaskKind::EnemyTurn)));
        assert!(!scheduler.is_scheduled(id));
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(TaskKind::Autosave, 30_000);

        scheduler.advance(95_000);

        assert_eq!(drain(&mut scheduler).len(), 3);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_once(TaskKind::EncounterCheck, 100);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        scheduler.advance(1000);

        assert!(drain(&mut scheduler).is_empty());
    }

    #[test]
    fn test_cancel_between_pops_suppresses_due_task() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(TaskKind::EncounterCheck, 10);
        let autosave = scheduler.schedule_repeating(TaskKind::Autosave, 20);
        scheduler.advance(50);

        let (_, first) = scheduler.pop_due().unwrap();
        assert_eq!(first, TaskKind::EncounterCheck);
        scheduler.cancel(autosave);

        assert_eq!(scheduler.pop_due(), None);
    }

    #[test]
    fn test_due_order_then_creation_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(TaskKind::EnemyTurn, 50);
        scheduler.schedule_once(TaskKind::Autosave, 10);
        scheduler.schedule_once(TaskKind::EncounterCheck, 10);
        scheduler.advance(100);

        assert_eq!(
            drain(&mut scheduler),
            vec![TaskKind::Autosave, TaskKind::EncounterCheck, TaskKind::EnemyTurn]
        );
    }

    #[test]
    fn test_remaining_ms() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_once(TaskKind::EnemyTurn, 1000);
        scheduler.advance(400);
        assert_eq!(scheduler.remaining_ms(id), Some(600));
        scheduler.cancel(id);
        assert_eq!(scheduler.remaining_ms(id), None);
    }
}
