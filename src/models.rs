//! Domain records held by the dashboard store.
//!
//! These are the shapes persisted to each storage slot as JSON arrays, so the
//! field names follow the camelCase layout of existing snapshots. Nothing in
//! here holds a live reference to another collection: tasks point at team
//! members by id and courses name their owner as free text.

use crate::errors::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Management role of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Chief executive
    Ceo,
    /// Operations and sales
    Coo,
    /// Marketing and community
    Cmo,
    /// Product and teaching
    Cpo,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ceo => "CEO",
            Self::Coo => "COO",
            Self::Cmo => "CMO",
            Self::Cpo => "CPO",
        };
        f.write_str(label)
    }
}

/// A member of the fixed management roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role_title: String,
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub kpis: Vec<String>,
    /// Name of the person covering for this member
    #[serde(default)]
    pub backup: String,
    /// Display colour token
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Lifecycle stage of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseStatus {
    #[default]
    Planning,
    Marketing,
    Active,
    Completed,
}

impl CourseStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Planning,
        Self::Marketing,
        Self::Active,
        Self::Completed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Marketing => "Marketing",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown course status '{s}'"))
    }
}

/// A student enrolled in exactly one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub amount_paid: i64,
    #[serde(default)]
    pub notes: String,
    /// Values for the owning course's custom columns
    #[serde(default)]
    pub custom_data: BTreeMap<String, String>,
}

/// A course and its roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: CourseStatus,
    /// Always `students.len()` once students are managed through the store
    #[serde(default)]
    pub registrants: u32,
    #[serde(default)]
    pub max_capacity: u32,
    #[serde(default)]
    pub revenue: i64,
    /// Free-text owner name, matched against team member names for display only
    #[serde(default)]
    pub owner: String,
    #[serde(default, with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    /// Number of weekly sessions, not a calendar span
    #[serde(default)]
    pub duration_weeks: u32,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub student_columns: Vec<String>,
}

impl Course {
    /// Number of weekly sessions; zero is treated as a single session.
    #[must_use]
    pub fn session_count(&self) -> u32 {
        self.duration_weeks.max(1)
    }
}

/// Monthly revenue line, keyed by its month label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub name: String,
    #[serde(default)]
    pub revenue: i64,
    #[serde(default)]
    pub profit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    Done,
}

impl TaskStatus {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Done,
            Self::Done => Self::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Done => "Done",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, most urgent first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::High, Self::Medium, Self::Low]
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown priority '{s}'"))
    }
}

/// A team task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    /// Team member id; may dangle
    #[serde(default)]
    pub assignee_id: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(
        default,
        with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Input for a new course; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub name: String,
    pub status: CourseStatus,
    pub max_capacity: u32,
    pub revenue: i64,
    pub owner: String,
    pub start_date: Option<NaiveDate>,
    pub duration_weeks: u32,
    pub student_columns: Vec<String>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            status: CourseStatus::Planning,
            max_capacity: 20,
            revenue: 0,
            owner: String::new(),
            start_date: None,
            duration_weeks: 4,
            student_columns: Vec::new(),
        }
    }
}

/// Input for a new student; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub phone: String,
    pub amount_paid: i64,
    pub notes: String,
    pub custom_data: BTreeMap<String, String>,
}

/// Input for a new task; the store assigns the id and starts it as pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub description: String,
    pub assignee_id: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    /// Defaults to today when absent
    pub assigned_date: Option<NaiveDate>,
}

/// Partial edit of a course; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub revenue: Option<i64>,
    pub max_capacity: Option<u32>,
    /// `Some(None)` clears the start date
    pub start_date: Option<Option<NaiveDate>>,
    pub duration_weeks: Option<u32>,
}

impl CourseChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the edit in place. The roster and registrants are untouched.
    pub fn apply(self, course: &mut Course) -> crate::errors::Result<()> {
        if let Some(name) = self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::validation("Course name cannot be empty"));
            }
            course.name = name.to_string();
        }
        if let Some(owner) = self.owner {
            course.owner = owner.trim().to_string();
        }
        if let Some(revenue) = self.revenue {
            course.revenue = revenue;
        }
        if let Some(max_capacity) = self.max_capacity {
            course.max_capacity = max_capacity;
        }
        if let Some(start_date) = self.start_date {
            course.start_date = start_date;
        }
        if let Some(weeks) = self.duration_weeks {
            course.duration_weeks = weeks;
        }
        Ok(())
    }
}

/// Partial edit of a task; status is changed by toggling, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub description: Option<String>,
    pub assignee_id: Option<String>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the due date
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, task: &mut Task) -> crate::errors::Result<()> {
        if let Some(description) = self.description {
            let description = description.trim();
            if description.is_empty() {
                return Err(Error::validation("Task description cannot be empty"));
            }
            task.description = description.to_string();
        }
        if let Some(assignee_id) = self.assignee_id {
            task.assignee_id = assignee_id;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        Ok(())
    }
}

/// Serde adapter for optional `YYYY-MM-DD` dates.
///
/// Snapshots written by older front-ends store dates as strings that may be
/// empty or carry a time suffix. Empty and unparseable values read as `None`;
/// a timestamp is cut down to its date part.
pub mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    /// Parses the leading `YYYY-MM-DD` of a date or timestamp string.
    #[must_use]
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, FORMAT).ok()
    }

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}
