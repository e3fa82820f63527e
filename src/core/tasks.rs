//! Task listing helpers - filtering, display order and per-member progress.

use crate::models::{Priority, Task, TaskStatus, TeamMember};
use chrono::NaiveDate;

/// Criteria for narrowing the task list; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub assignee_id: Option<String>,
    pub priority: Option<Priority>,
    /// Matches either the assigned date or the due date
    pub date: Option<NaiveDate>,
}

impl TaskFilter {
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(assignee) = &self.assignee_id {
            if &task.assignee_id != assignee {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(date) = self.date {
            if task.assigned_date != Some(date) && task.due_date != Some(date) {
                return false;
            }
        }
        true
    }
}

/// Pending before done, then by priority; ties keep collection order.
#[must_use]
pub fn sorted_for_display<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let mut listed: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
    listed.sort_by_key(|t| (t.status == TaskStatus::Done, t.priority.rank()));
    listed
}

/// Task completion figures for one team member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProgress<'a> {
    pub member: &'a TeamMember,
    /// Pending tasks, most urgent first
    pub pending: Vec<&'a Task>,
    pub done: usize,
    pub total: usize,
    /// Rounded share of done tasks, 0 when the member has none
    pub percent: u32,
}

/// Computes progress for `member` over the tasks assigned to them.
#[must_use]
pub fn member_progress<'a>(member: &'a TeamMember, tasks: &'a [Task]) -> MemberProgress<'a> {
    let assigned: Vec<&Task> = tasks.iter().filter(|t| t.assignee_id == member.id).collect();

    let mut pending: Vec<&Task> = assigned
        .iter()
        .copied()
        .filter(|t| t.status == TaskStatus::Pending)
        .collect();
    pending.sort_by_key(|t| t.priority.rank());

    let total = assigned.len();
    let done = total - pending.len();
    let percent = if total == 0 {
        0
    } else {
        u32::try_from((done * 100 + total / 2) / total).unwrap_or(100)
    };

    MemberProgress {
        member,
        pending,
        done,
        total,
        percent,
    }
}
