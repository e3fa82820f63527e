//! Shared test utilities for the course desk.
//!
//! This module provides helpers for setting up test databases, building
//! dashboards with predictable ids, and creating entities with sensible
//! defaults.

use crate::{
    config::seed::{SeedData, builtin_seed},
    core::{
        ids::SequentialIds,
        storage::{KeyValueStore, MemoryStore},
        store::Dashboard,
    },
    errors::{Error, Result},
    models::{Course, CourseStatus, Priority, Role, Student, Task, TaskStatus, TeamMember},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The built-in seed; panics if it does not parse, which its own tests cover.
#[allow(clippy::expect_used)]
pub fn seed_fixture() -> SeedData {
    builtin_seed().expect("built-in seed parses")
}

/// A dashboard over the built-in seed with ids `n1`, `n2`, ...
pub fn test_dashboard() -> Dashboard {
    Dashboard::seeded(seed_fixture(), Box::new(SequentialIds::new("n")), "fd_")
}

/// Creates a course with sensible defaults.
///
/// # Defaults
/// * `status`: Active
/// * `max_capacity`: 20
/// * `owner`: "Arina"
/// * no students, no custom columns
pub fn course_fixture(
    id: &str,
    name: &str,
    start_date: Option<NaiveDate>,
    duration_weeks: u32,
    revenue: i64,
) -> Course {
    Course {
        id: id.to_string(),
        name: name.to_string(),
        status: CourseStatus::Active,
        registrants: 0,
        max_capacity: 20,
        revenue,
        owner: "Arina".to_string(),
        start_date,
        duration_weeks,
        students: Vec::new(),
        student_columns: Vec::new(),
    }
}

/// Creates a student with empty contact details and no custom data.
pub fn student_fixture(id: &str, name: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        phone: String::new(),
        amount_paid: 0,
        notes: String::new(),
        custom_data: std::collections::BTreeMap::new(),
    }
}

/// Creates a team member in the COO role with no contact details.
pub fn member_fixture(id: &str, name: &str) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        role_title: "Operations".to_string(),
        role: Role::Coo,
        focus: String::new(),
        responsibilities: Vec::new(),
        kpis: Vec::new(),
        backup: String::new(),
        color: String::new(),
        email: None,
        phone: None,
    }
}

/// Creates an undated task.
pub fn task_fixture(id: &str, assignee_id: &str, status: TaskStatus, priority: Priority) -> Task {
    Task {
        id: id.to_string(),
        description: format!("Task {id}"),
        assignee_id: assignee_id.to_string(),
        status,
        priority,
        due_date: None,
        assigned_date: None,
    }
}

/// Key-value store that refuses reads and writes for chosen keys.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing_key: Option<String>,
}

impl FailingStore {
    /// Fails only for `key`; every other key behaves like a [`MemoryStore`].
    pub fn failing_on(key: &str) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing_key: Some(key.to_string()),
        }
    }

    /// Fails for every key.
    pub fn failing_everything() -> Self {
        Self::default()
    }

    fn check(&self, key: &str) -> Result<()> {
        match &self.failing_key {
            Some(failing) if failing != key => Ok(()),
            _ => Err(Error::Io(std::io::Error::other("quota exceeded"))),
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check(key)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check(key)?;
        self.inner.set(key, value).await
    }
}
