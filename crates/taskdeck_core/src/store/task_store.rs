//! Task sequence store.
//!
//! # Responsibility
//! - Keep the task sequence in memory, in insertion order.
//! - Persist the whole sequence under the `tasks` blob key on every
//!   mutation.
//! - Stamp creation and update times with a strictly monotonic clock.
//!
//! # Invariants
//! - A successful mutation leaves `updated_at` strictly greater than any
//!   stamp handed out before it, even when the wall clock stalls.
//! - Updating or deleting an unknown id is a silent no-op; the sequence
//!   value stays identical and nothing is persisted.
//! - Restored tasks are validated; invalid persisted state is rejected
//!   instead of masked.

use crate::blob::BlobStore;
use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};
use crate::model::user::UserId;
use crate::store::{read_json, write_json, StoreResult, TASKS_KEY};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};

/// Task sequence mirrored into a blob store.
pub struct TaskStore<'b> {
    blob: &'b dyn BlobStore,
    tasks: Vec<Task>,
    last_stamp: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for TaskStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("last_stamp", &self.last_stamp)
            .finish_non_exhaustive()
    }
}

impl<'b> TaskStore<'b> {
    /// Restores the task sequence from the blob store.
    ///
    /// Starts empty when nothing was persisted yet. Every restored task
    /// is validated so a corrupted blob fails the open instead of leaking
    /// invalid records into derivations.
    pub fn open(blob: &'b dyn BlobStore) -> StoreResult<Self> {
        let tasks = read_json::<Vec<Task>>(blob, TASKS_KEY)?.unwrap_or_default();
        for task in &tasks {
            task.validate()?;
        }
        let last_stamp = tasks.iter().map(|task| task.updated_at).max();
        info!(
            "event=tasks_open module=store status=ok task_count={}",
            tasks.len()
        );
        Ok(Self {
            blob,
            tasks,
            last_stamp,
        })
    }

    /// Next mutation stamp: wall clock, bumped past the previous stamp
    /// when the clock has not advanced. Keeps `updated_at` strictly
    /// increasing across same-instant mutations.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) => {
                let floor = last + Duration::microseconds(1);
                if now > floor {
                    now
                } else {
                    floor
                }
            }
            None => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    /// Appends a task built from the draft and returns its generated id.
    ///
    /// # Contract
    /// - `created_at == updated_at` on the stored record.
    /// - The sequence is persisted before the in-memory commit.
    pub fn add_task(&mut self, draft: TaskDraft) -> StoreResult<TaskId> {
        let task = Task::new(draft, self.next_stamp());
        task.validate()?;
        let id = task.id;

        let mut next_tasks = self.tasks.clone();
        next_tasks.push(task);
        write_json(self.blob, TASKS_KEY, &next_tasks)?;
        self.tasks = next_tasks;
        info!(
            "event=add_task module=store status=ok task_id={} task_count={}",
            id,
            self.tasks.len()
        );
        Ok(id)
    }

    /// Merges the patch onto the task with the given id.
    ///
    /// # Contract
    /// - Only fields set in the patch change; the rest stay untouched.
    /// - `updated_at` is refreshed even by an empty patch.
    /// - Unknown ids are a silent no-op.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> StoreResult<()> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=update_task module=store status=noop task_id={id}");
            return Ok(());
        };

        let stamp = self.next_stamp();
        let mut next_tasks = self.tasks.clone();
        let task = &mut next_tasks[index];
        patch.apply_to(task);
        task.updated_at = stamp;
        task.validate()?;

        write_json(self.blob, TASKS_KEY, &next_tasks)?;
        self.tasks = next_tasks;
        info!("event=update_task module=store status=ok task_id={id}");
        Ok(())
    }

    /// Removes the task with the given id; unknown ids are a silent no-op.
    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<()> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=delete_task module=store status=noop task_id={id}");
            return Ok(());
        };

        let mut next_tasks = self.tasks.clone();
        next_tasks.remove(index);
        write_json(self.blob, TASKS_KEY, &next_tasks)?;
        self.tasks = next_tasks;
        info!(
            "event=delete_task module=store status=ok task_id={} task_count={}",
            id,
            self.tasks.len()
        );
        Ok(())
    }

    /// Full sequence in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by id.
    pub fn task_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks assigned to the given user, insertion order preserved.
    pub fn tasks_by_user(&self, user_id: UserId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.assigned_to == user_id)
            .collect()
    }

    /// Tasks with the given priority, insertion order preserved.
    pub fn tasks_by_priority(&self, priority: TaskPriority) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.priority == priority)
            .collect()
    }

    /// Tasks with the given status, insertion order preserved.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status == status)
            .collect()
    }
}
