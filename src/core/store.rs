//! The dashboard entity store.
//!
//! [`Dashboard`] owns the five collections for the lifetime of the process.
//! It is built once in `main`, loaded from a [`KeyValueStore`] with a seed
//! fallback per collection, mutated synchronously in memory, and written back
//! only when [`Dashboard::save_all`] is called.

use crate::{
    config::seed::SeedData,
    core::{
        finance::{self, ReconcileResult},
        ids::IdGenerator,
        storage::KeyValueStore,
    },
    errors::{Error, Result},
    models::{
        Course, CourseDraft, FinancialRecord, PaymentLink, Student, StudentDraft, Task, TaskDraft,
        TaskStatus, TeamMember,
    },
};
use chrono::Local;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument, warn};

/// Persisted collections, in save order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Courses,
    Financial,
    Tasks,
    Team,
    PaymentLinks,
}

impl Slot {
    pub const ALL: [Self; 5] = [
        Self::Courses,
        Self::Financial,
        Self::Tasks,
        Self::Team,
        Self::PaymentLinks,
    ];

    /// Logical key of the slot, before the configured prefix.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Financial => "financial",
            Self::Tasks => "tasks",
            Self::Team => "team",
            Self::PaymentLinks => "payment_links",
        }
    }
}

/// In-memory source of truth for the running session.
pub struct Dashboard {
    courses: Vec<Course>,
    financial_data: Vec<FinancialRecord>,
    tasks: Vec<Task>,
    team_members: Vec<TeamMember>,
    payment_links: Vec<PaymentLink>,
    ids: Box<dyn IdGenerator>,
    key_prefix: String,
}

impl Dashboard {
    /// Builds a store from seed data alone, for runs without a persistence backend.
    #[must_use]
    pub fn seeded(seed: SeedData, ids: Box<dyn IdGenerator>, key_prefix: &str) -> Self {
        Self {
            courses: seed.courses,
            financial_data: seed.financial,
            tasks: seed.tasks,
            team_members: seed.team,
            payment_links: seed.payment_links,
            ids,
            key_prefix: key_prefix.to_string(),
        }
    }

    /// Loads every collection from `storage`, falling back to `seed` per collection.
    ///
    /// Never fails: a missing slot means first run, an unreadable one is
    /// logged and replaced by its seed. One bad slot does not affect the others.
    #[instrument(skip_all, fields(prefix = key_prefix))]
    pub async fn load(
        storage: &dyn KeyValueStore,
        seed: SeedData,
        ids: Box<dyn IdGenerator>,
        key_prefix: &str,
    ) -> Self {
        let mut dashboard = Self::seeded(SeedData::default(), ids, key_prefix);

        dashboard.courses =
            load_slot(storage, &dashboard.slot_key(Slot::Courses), seed.courses).await;
        dashboard.financial_data =
            load_slot(storage, &dashboard.slot_key(Slot::Financial), seed.financial).await;
        dashboard.tasks = load_slot(storage, &dashboard.slot_key(Slot::Tasks), seed.tasks).await;
        dashboard.team_members =
            load_slot(storage, &dashboard.slot_key(Slot::Team), seed.team).await;
        dashboard.payment_links = load_slot(
            storage,
            &dashboard.slot_key(Slot::PaymentLinks),
            seed.payment_links,
        )
        .await;

        info!(
            courses = dashboard.courses.len(),
            tasks = dashboard.tasks.len(),
            financial = dashboard.financial_data.len(),
            team = dashboard.team_members.len(),
            payment_links = dashboard.payment_links.len(),
            "Dashboard loaded"
        );
        dashboard
    }

    /// Writes all five collections to `storage`, one write per slot.
    ///
    /// Stops at the first failed write and reports its slot. Slots written
    /// before the failure stay written.
    #[instrument(skip_all, fields(prefix = %self.key_prefix))]
    pub async fn save_all(&self, storage: &dyn KeyValueStore) -> Result<()> {
        let snapshots = [
            (Slot::Courses, to_snapshot(&self.courses)?),
            (Slot::Financial, to_snapshot(&self.financial_data)?),
            (Slot::Tasks, to_snapshot(&self.tasks)?),
            (Slot::Team, to_snapshot(&self.team_members)?),
            (Slot::PaymentLinks, to_snapshot(&self.payment_links)?),
        ];

        for (slot, snapshot) in snapshots {
            let key = self.slot_key(slot);
            storage
                .set(&key, &snapshot)
                .await
                .map_err(|e| Error::Storage {
                    key: key.clone(),
                    message: e.to_string(),
                })?;
            debug!("Saved slot {key} ({} bytes)", snapshot.len());
        }

        info!("All collections saved");
        Ok(())
    }

    /// Full storage key of a slot.
    #[must_use]
    pub fn slot_key(&self, slot: Slot) -> String {
        format!("{}{}", self.key_prefix, slot.key())
    }

    // --- Collections ---

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn financial_data(&self) -> &[FinancialRecord] {
        &self.financial_data
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn team_members(&self) -> &[TeamMember] {
        &self.team_members
    }

    #[must_use]
    pub fn payment_links(&self) -> &[PaymentLink] {
        &self.payment_links
    }

    // --- Lookups ---

    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Finds a course by id, or by name when exactly one course carries it.
    pub fn resolve_course(&self, key: &str) -> Result<&Course> {
        let found = resolve(
            &self.courses,
            key,
            |c| c.id.as_str(),
            |c| c.name.as_str(),
            "courses",
        )?;
        found.ok_or_else(|| Error::CourseNotFound {
            id: key.trim().to_string(),
        })
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Finds a task by id, or by description when exactly one task has it.
    pub fn resolve_task(&self, key: &str) -> Result<&Task> {
        let found = resolve(
            &self.tasks,
            key,
            |t| t.id.as_str(),
            |t| t.description.as_str(),
            "tasks",
        )?;
        found.ok_or_else(|| Error::TaskNotFound {
            id: key.trim().to_string(),
        })
    }

    /// Finds a payment link by id, or by title when exactly one link has it.
    pub fn resolve_payment_link(&self, key: &str) -> Result<&PaymentLink> {
        let found = resolve(
            &self.payment_links,
            key,
            |l| l.id.as_str(),
            |l| l.title.as_str(),
            "payment links",
        )?;
        found.ok_or_else(|| Error::PaymentLinkNotFound {
            id: key.trim().to_string(),
        })
    }

    #[must_use]
    pub fn team_member(&self, id: &str) -> Option<&TeamMember> {
        self.team_members.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn team_member_by_name(&self, name: &str) -> Option<&TeamMember> {
        self.team_members.iter().find(|m| m.name == name)
    }

    // --- Courses ---

    /// Adds a course with a fresh id and returns that id.
    pub fn add_course(&mut self, draft: CourseDraft) -> Result<String> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Course name cannot be empty"));
        }

        let id = self.ids.next_id();
        let mut course = Course {
            id: id.clone(),
            name: name.to_string(),
            status: draft.status,
            registrants: 0,
            max_capacity: draft.max_capacity,
            revenue: draft.revenue,
            owner: draft.owner,
            start_date: draft.start_date,
            duration_weeks: draft.duration_weeks,
            students: Vec::new(),
            student_columns: draft.student_columns,
        };
        course.recount_registrants();
        self.courses.push(course);

        debug!("Added course {id}");
        Ok(id)
    }

    /// Replaces the course with the same id. Returns `false` if there is none.
    pub fn update_course(&mut self, course: Course) -> bool {
        match self.courses.iter_mut().find(|c| c.id == course.id) {
            Some(slot) => {
                *slot = course;
                true
            }
            None => {
                debug!("update_course: no course with id {}", course.id);
                false
            }
        }
    }

    /// Removes a course. Tasks and financial records are left as they are.
    pub fn delete_course(&mut self, id: &str) -> Option<Course> {
        let index = self.courses.iter().position(|c| c.id == id)?;
        Some(self.courses.remove(index))
    }

    // --- Students ---

    /// Enrolls a student in a course; `registrants` follows the roster.
    pub fn add_student(&mut self, course_id: &str, draft: StudentDraft) -> Result<&Student> {
        if draft.name.trim().is_empty() {
            return Err(Error::validation("Student name cannot be empty"));
        }
        let id = self.ids.next_id();
        let course = self.course_mut(course_id)?;
        Ok(course.enroll(id, draft))
    }

    /// Removes a student from a course; `registrants` follows the roster.
    pub fn remove_student(&mut self, course_id: &str, student_id: &str) -> Result<Student> {
        self.course_mut(course_id)?.unenroll(student_id)
    }

    /// Declares a custom student column on a course.
    pub fn add_student_column(&mut self, course_id: &str, column: &str) -> Result<()> {
        self.course_mut(course_id)?.add_student_column(column)
    }

    fn course_mut(&mut self, course_id: &str) -> Result<&mut Course> {
        self.courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or_else(|| Error::CourseNotFound {
                id: course_id.to_string(),
            })
    }

    // --- Tasks ---

    /// Adds a pending task with a fresh id and returns that id.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<String> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(Error::validation("Task description cannot be empty"));
        }

        let id = self.ids.next_id();
        self.tasks.push(Task {
            id: id.clone(),
            description: description.to_string(),
            assignee_id: draft.assignee_id,
            status: TaskStatus::Pending,
            priority: draft.priority,
            due_date: draft.due_date,
            assigned_date: draft
                .assigned_date
                .or_else(|| Some(Local::now().date_naive())),
        });

        debug!("Added task {id}");
        Ok(id)
    }

    /// Replaces the task with the same id. Returns `false` if there is none.
    pub fn update_task(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => {
                debug!("update_task: no task with id {}", task.id);
                false
            }
        }
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Flips a task between pending and done, returning the new status.
    pub fn toggle_task_status(&mut self, id: &str) -> Option<TaskStatus> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.status = task.status.toggled();
        Some(task.status)
    }

    // --- Team ---

    /// Replaces the team member with the same id. The roster itself is fixed.
    pub fn update_team_member(&mut self, member: TeamMember) -> bool {
        match self.team_members.iter_mut().find(|m| m.id == member.id) {
            Some(slot) => {
                *slot = member;
                true
            }
            None => {
                debug!("update_team_member: no member with id {}", member.id);
                false
            }
        }
    }

    // --- Finance ---

    /// Inserts or wholly replaces the record with the same month name.
    pub fn update_financial_record(&mut self, record: FinancialRecord) {
        match self
            .financial_data
            .iter_mut()
            .find(|r| r.name == record.name)
        {
            Some(slot) => *slot = record,
            None => self.financial_data.push(record),
        }
    }

    /// Recomputes monthly revenue from the courses and merges it into the records.
    pub fn sync_financials_with_courses(&mut self) -> ReconcileResult {
        let result = finance::reconcile(&mut self.financial_data, &self.courses);
        info!(
            updated = result.updated.len(),
            created = result.created.len(),
            collapsed = result.collapsed.len(),
            "Financial records synced with courses"
        );
        result
    }

    // --- Payment links ---

    /// Adds a payment link with a fresh id and returns that id.
    pub fn add_payment_link(&mut self, title: &str, url: &str) -> Result<String> {
        let (title, url) = (title.trim(), url.trim());
        if title.is_empty() || url.is_empty() {
            return Err(Error::validation("Payment link needs a title and a URL"));
        }

        let id = self.ids.next_id();
        self.payment_links.push(PaymentLink {
            id: id.clone(),
            title: title.to_string(),
            url: url.to_string(),
        });
        Ok(id)
    }

    pub fn delete_payment_link(&mut self, id: &str) -> Option<PaymentLink> {
        let index = self.payment_links.iter().position(|l| l.id == id)?;
        Some(self.payment_links.remove(index))
    }
}

async fn load_slot<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
    fallback: Vec<T>,
) -> Vec<T> {
    match storage.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("Stored slot {key} is unreadable, using seed data: {e}");
                fallback
            }
        },
        Ok(None) => {
            debug!("No stored slot {key}, using seed data");
            fallback
        }
        Err(e) => {
            warn!("Failed to read slot {key}, using seed data: {e}");
            fallback
        }
    }
}

/// Id match first, then a unique display-name match. Only ids are unique, so a
/// name shared by several entries is rejected with the ids to pick from.
fn resolve<'a, T>(
    items: &'a [T],
    key: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
    kind: &str,
) -> Result<Option<&'a T>> {
    let key = key.trim();
    if let Some(item) = items.iter().find(|item| id(item) == key) {
        return Ok(Some(item));
    }

    let named: Vec<&T> = items.iter().filter(|item| name(item) == key).collect();
    match named.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        several => {
            let ids: Vec<&str> = several.iter().map(|item| id(item)).collect();
            Err(Error::validation(format!(
                "{} {kind} are named '{key}'; pick one by id: {}",
                several.len(),
                ids.join(", ")
            )))
        }
    }
}

fn to_snapshot<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::ids::SequentialIds;
    use crate::core::storage::{MemoryStore, SqliteStore};
    use crate::models::{CourseStatus, Priority};
    use crate::test_utils::{
        FailingStore, course_fixture, seed_fixture, setup_test_db, student_fixture,
        task_fixture, test_dashboard,
    };
    use chrono::NaiveDate;

    async fn load_from(storage: &dyn KeyValueStore) -> Dashboard {
        Dashboard::load(
            storage,
            seed_fixture(),
            Box::new(SequentialIds::new("n")),
            "fd_",
        )
        .await
    }

    #[tokio::test]
    async fn test_load_without_snapshots_returns_seed() {
        let storage = MemoryStore::new();
        let dashboard = load_from(&storage).await;
        let seed = seed_fixture();

        assert_eq!(dashboard.courses(), seed.courses.as_slice());
        assert_eq!(dashboard.tasks(), seed.tasks.as_slice());
        assert_eq!(dashboard.team_members(), seed.team.as_slice());
        assert_eq!(dashboard.financial_data(), seed.financial.as_slice());
        assert_eq!(dashboard.payment_links(), seed.payment_links.as_slice());
    }

    #[tokio::test]
    async fn test_save_then_load_returns_saved_data() -> Result<()> {
        let storage = SqliteStore::new(setup_test_db().await?);
        let mut dashboard = load_from(&storage).await;

        let course_id = dashboard.add_course(CourseDraft {
            name: "Evening group".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1),
            ..CourseDraft::default()
        })?;
        dashboard.add_student(&course_id, student_draft("Dana"))?;
        dashboard.add_task(TaskDraft {
            description: "Print certificates".to_string(),
            assignee_id: "arina".to_string(),
            ..TaskDraft::default()
        })?;
        dashboard.add_payment_link("Deposit", "https://pay.example.com/d")?;
        dashboard.sync_financials_with_courses();
        dashboard.save_all(&storage).await?;

        let reloaded = load_from(&storage).await;
        assert_eq!(reloaded.courses(), dashboard.courses());
        assert_eq!(reloaded.tasks(), dashboard.tasks());
        assert_eq!(reloaded.financial_data(), dashboard.financial_data());
        assert_eq!(reloaded.team_members(), dashboard.team_members());
        assert_eq!(reloaded.payment_links(), dashboard.payment_links());
        assert_eq!(reloaded.course(&course_id).unwrap().registrants, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_slot_falls_back_for_that_collection_only() {
        let saved_courses = vec![course_fixture("saved", "Saved", None, 4, 100)];
        let storage = MemoryStore::with_slots([
            ("fd_tasks", "{not json".to_string()),
            ("fd_courses", serde_json::to_string(&saved_courses).unwrap()),
        ]);

        let dashboard = load_from(&storage).await;

        assert_eq!(dashboard.tasks(), seed_fixture().tasks.as_slice());
        assert_eq!(dashboard.courses(), saved_courses.as_slice());
    }

    #[tokio::test]
    async fn test_unreadable_backend_falls_back_to_seed() {
        let storage = FailingStore::failing_everything();
        let dashboard = load_from(&storage).await;
        assert_eq!(dashboard.courses(), seed_fixture().courses.as_slice());
    }

    #[tokio::test]
    async fn test_save_writes_every_slot_under_prefix() -> Result<()> {
        let storage = MemoryStore::new();
        let dashboard = test_dashboard();
        dashboard.save_all(&storage).await?;

        for key in [
            "fd_courses",
            "fd_financial",
            "fd_tasks",
            "fd_team",
            "fd_payment_links",
        ] {
            assert!(storage.get(key).await?.is_some(), "missing {key}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_save_failure_names_slot_and_keeps_earlier_writes() -> Result<()> {
        let storage = FailingStore::failing_on("fd_tasks");
        let dashboard = test_dashboard();

        let result = dashboard.save_all(&storage).await;

        assert!(matches!(result, Err(Error::Storage { ref key, .. }) if key == "fd_tasks"));
        assert!(storage.get("fd_courses").await?.is_some());
        assert!(storage.get("fd_financial").await?.is_some());
        assert!(storage.get("fd_team").await?.is_none());
        Ok(())
    }

    #[test]
    fn test_mutations_do_not_touch_storage_until_saved() {
        let mut dashboard = test_dashboard();
        let before = dashboard.courses().len();
        dashboard
            .add_course(CourseDraft {
                name: "New".to_string(),
                ..CourseDraft::default()
            })
            .unwrap();
        assert_eq!(dashboard.courses().len(), before + 1);
    }

    #[test]
    fn test_add_course_assigns_id_and_validates_name() {
        let mut dashboard = test_dashboard();

        let id = dashboard
            .add_course(CourseDraft {
                name: "  Prompting 101 ".to_string(),
                status: CourseStatus::Marketing,
                ..CourseDraft::default()
            })
            .unwrap();

        let course = dashboard.course(&id).unwrap();
        assert_eq!(course.name, "Prompting 101");
        assert_eq!(course.registrants, 0);
        assert_eq!(course.duration_weeks, 4);

        let result = dashboard.add_course(CourseDraft::default());
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_update_course_replaces_by_id_or_does_nothing() {
        let mut dashboard = test_dashboard();
        let mut course = dashboard.courses()[0].clone();
        course.revenue = 12_345;

        assert!(dashboard.update_course(course.clone()));
        assert_eq!(dashboard.course(&course.id).unwrap().revenue, 12_345);

        let before = dashboard.courses().to_vec();
        let mut stranger = course;
        stranger.id = "no-such-course".to_string();
        assert!(!dashboard.update_course(stranger));
        assert_eq!(dashboard.courses(), before.as_slice());
    }

    #[test]
    fn test_add_student_increments_registrants() {
        let mut dashboard = test_dashboard();
        let mut course = course_fixture("two", "Two students", None, 4, 0);
        course.students = vec![student_fixture("s1", "Dana"), student_fixture("s2", "Omer")];
        course.registrants = 2;
        dashboard.courses.push(course);

        dashboard.add_student("two", student_draft("Noa")).unwrap();

        assert_eq!(dashboard.course("two").unwrap().registrants, 3);
        assert_eq!(dashboard.course("two").unwrap().students.len(), 3);
    }

    #[test]
    fn test_remove_student_decrements_registrants() {
        let mut dashboard = test_dashboard();
        let course_id = dashboard.courses()[0].id.clone();
        let first = dashboard.add_student(&course_id, student_draft("Dana")).unwrap().id.clone();
        dashboard.add_student(&course_id, student_draft("Omer")).unwrap();
        let n = dashboard.course(&course_id).unwrap().students.len();

        dashboard.remove_student(&course_id, &first).unwrap();

        let course = dashboard.course(&course_id).unwrap();
        assert_eq!(course.registrants as usize, n - 1);
        assert!(course.students.iter().all(|s| s.id != first));
    }

    #[test]
    fn test_student_operations_on_unknown_course() {
        let mut dashboard = test_dashboard();
        assert!(matches!(
            dashboard.add_student("ghost", student_draft("Dana")),
            Err(Error::CourseNotFound { .. })
        ));
        assert!(matches!(
            dashboard.remove_student("ghost", "s1"),
            Err(Error::CourseNotFound { .. })
        ));
        assert!(matches!(
            dashboard.add_student_column("ghost", "Email"),
            Err(Error::CourseNotFound { .. })
        ));
    }

    #[test]
    fn test_add_student_rejects_blank_name() {
        let mut dashboard = test_dashboard();
        let course_id = dashboard.courses()[0].id.clone();
        assert!(matches!(
            dashboard.add_student(&course_id, student_draft("  ")),
            Err(Error::Validation { .. })
        ));
        assert_eq!(dashboard.course(&course_id).unwrap().registrants, 0);
    }

    #[test]
    fn test_delete_course_does_not_cascade() {
        let mut dashboard = test_dashboard();
        let course = dashboard.courses()[0].clone();
        dashboard.tasks.push(task_fixture(
            "owner-named",
            &course.owner,
            TaskStatus::Pending,
            Priority::Low,
        ));
        let tasks_before = dashboard.tasks().to_vec();
        let records_before = dashboard.financial_data().to_vec();

        let removed = dashboard.delete_course(&course.id);

        assert_eq!(removed.map(|c| c.id), Some(course.id.clone()));
        assert!(dashboard.course(&course.id).is_none());
        assert_eq!(dashboard.tasks(), tasks_before.as_slice());
        assert_eq!(dashboard.financial_data(), records_before.as_slice());
        assert!(dashboard.delete_course(&course.id).is_none());
    }

    #[test]
    fn test_add_task_starts_pending_with_assigned_date() {
        let mut dashboard = test_dashboard();
        let id = dashboard
            .add_task(TaskDraft {
                description: "Call the venue".to_string(),
                assignee_id: "faina".to_string(),
                priority: Priority::High,
                ..TaskDraft::default()
            })
            .unwrap();

        let task = dashboard.task(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.assigned_date.is_some());

        assert!(matches!(
            dashboard.add_task(TaskDraft::default()),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_toggle_task_status_is_its_own_inverse() {
        let mut dashboard = test_dashboard();
        let id = dashboard.tasks()[0].id.clone();
        let original = dashboard.task(&id).unwrap().status;

        assert_eq!(dashboard.toggle_task_status(&id), Some(original.toggled()));
        assert_eq!(dashboard.toggle_task_status(&id), Some(original));
        assert_eq!(dashboard.task(&id).unwrap().status, original);
        assert_eq!(dashboard.toggle_task_status("ghost"), None);
    }

    #[test]
    fn test_update_and_delete_task() {
        let mut dashboard = test_dashboard();
        let mut task = dashboard.tasks()[0].clone();
        task.description = "Changed".to_string();

        assert!(dashboard.update_task(task.clone()));
        assert_eq!(dashboard.task(&task.id).unwrap().description, "Changed");

        assert!(dashboard.delete_task(&task.id).is_some());
        assert!(dashboard.task(&task.id).is_none());
        assert!(!dashboard.update_task(task));
    }

    #[test]
    fn test_update_team_member_replaces_contact_fields() {
        let mut dashboard = test_dashboard();
        let mut member = dashboard.team_members()[0].clone();
        member.phone = Some("050-0000000".to_string());
        member.email = Some("ceo@example.com".to_string());

        assert!(dashboard.update_team_member(member.clone()));
        assert_eq!(dashboard.team_member(&member.id), Some(&member));

        let roster_size = dashboard.team_members().len();
        member.id = "newcomer".to_string();
        assert!(!dashboard.update_team_member(member));
        assert_eq!(dashboard.team_members().len(), roster_size);
    }

    #[test]
    fn test_update_financial_record_appends_or_replaces() {
        let mut dashboard = test_dashboard();
        let count = dashboard.financial_data().len();

        dashboard.update_financial_record(FinancialRecord {
            name: "אוגוסט".to_string(),
            revenue: 100,
            profit: 40,
        });
        assert_eq!(dashboard.financial_data().len(), count + 1);

        dashboard.update_financial_record(FinancialRecord {
            name: "אוגוסט".to_string(),
            revenue: 250,
            profit: 10,
        });
        assert_eq!(dashboard.financial_data().len(), count + 1);
        let record = dashboard
            .financial_data()
            .iter()
            .find(|r| r.name == "אוגוסט")
            .unwrap();
        assert_eq!((record.revenue, record.profit), (250, 10));
    }

    #[test]
    fn test_sync_financials_merges_july_example() {
        let mut dashboard = test_dashboard();
        dashboard.courses = vec![
            course_fixture("a", "A", NaiveDate::from_ymd_opt(2025, 7, 6), 4, 1000),
            course_fixture("b", "B", NaiveDate::from_ymd_opt(2025, 7, 13), 4, 2500),
        ];
        dashboard.financial_data = vec![FinancialRecord {
            name: "יולי".to_string(),
            revenue: 500,
            profit: 900,
        }];

        dashboard.sync_financials_with_courses();
        let once = dashboard.financial_data().to_vec();
        dashboard.sync_financials_with_courses();

        assert_eq!(
            once,
            vec![FinancialRecord {
                name: "יולי".to_string(),
                revenue: 3500,
                profit: 900,
            }]
        );
        assert_eq!(dashboard.financial_data(), once.as_slice());
    }

    #[test]
    fn test_payment_links() {
        let mut dashboard = test_dashboard();
        let count = dashboard.payment_links().len();

        let id = dashboard
            .add_payment_link("Full price", "https://pay.example.com/full")
            .unwrap();
        assert_eq!(dashboard.payment_links().len(), count + 1);
        assert!(dashboard.add_payment_link("", "https://x").is_err());

        assert_eq!(
            dashboard.delete_payment_link(&id).map(|l| l.title),
            Some("Full price".to_string())
        );
        assert_eq!(dashboard.payment_links().len(), count);
    }

    #[test]
    fn test_lookups_tolerate_dangling_references() {
        let dashboard = test_dashboard();
        assert!(dashboard.team_member("left-the-company").is_none());
        assert!(dashboard.team_member_by_name("Nobody").is_none());
        assert!(matches!(
            dashboard.resolve_course("Cancelled"),
            Err(Error::CourseNotFound { .. })
        ));
        assert!(matches!(
            dashboard.resolve_payment_link("Gone"),
            Err(Error::PaymentLinkNotFound { .. })
        ));
    }

    #[test]
    fn test_courses_sharing_a_name_stay_reachable_by_id() {
        let mut dashboard = test_dashboard();
        let evening = || CourseDraft {
            name: "Evening".to_string(),
            ..CourseDraft::default()
        };
        let first = dashboard.add_course(evening()).unwrap();
        let second = dashboard.add_course(evening()).unwrap();

        assert_eq!(dashboard.resolve_course(&second).unwrap().id, second);
        assert_eq!(dashboard.resolve_course(&first).unwrap().id, first);

        let by_name = dashboard.resolve_course("Evening");
        assert!(
            matches!(by_name, Err(Error::Validation { ref message })
                if message.contains(&first) && message.contains(&second))
        );

        dashboard.delete_course(&second);
        assert_eq!(dashboard.resolve_course(" Evening ").unwrap().id, first);
    }

    #[test]
    fn test_tasks_and_links_sharing_a_label_resolve_by_id() {
        let mut dashboard = test_dashboard();
        let draft = || TaskDraft {
            description: "Call the venue".to_string(),
            assignee_id: "faina".to_string(),
            ..TaskDraft::default()
        };
        dashboard.add_task(draft()).unwrap();
        let second = dashboard.add_task(draft()).unwrap();

        assert!(dashboard.resolve_task("Call the venue").is_err());
        let id = dashboard.resolve_task(&second).unwrap().id.clone();
        dashboard.toggle_task_status(&id);
        assert_eq!(dashboard.task(&second).unwrap().status, TaskStatus::Done);

        dashboard.add_payment_link("Deposit", "https://pay.example.com/a").unwrap();
        let other = dashboard
            .add_payment_link("Deposit", "https://pay.example.com/b")
            .unwrap();
        assert!(dashboard.resolve_payment_link("Deposit").is_err());
        assert_eq!(
            dashboard.resolve_payment_link(&other).unwrap().url,
            "https://pay.example.com/b"
        );
    }

    #[test]
    fn test_slot_keys() {
        let dashboard = test_dashboard();
        let keys: Vec<String> = Slot::ALL.iter().map(|s| dashboard.slot_key(*s)).collect();
        assert_eq!(
            keys,
            vec![
                "fd_courses",
                "fd_financial",
                "fd_tasks",
                "fd_team",
                "fd_payment_links"
            ]
        );
    }

    fn student_draft(name: &str) -> StudentDraft {
        StudentDraft {
            name: name.to_string(),
            phone: "050-1234567".to_string(),
            ..StudentDraft::default()
        }
    }
}
