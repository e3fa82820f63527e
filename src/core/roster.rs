//! Course rosters - students, custom columns and the registrant count.
//!
//! `registrants` is derived from the roster: every add or remove recomputes
//! it in the same call. Custom student fields are keyed by the course's
//! declared columns. Values under undeclared keys are kept but not shown, and
//! a declared column with no value reads as empty.

use crate::errors::{Error, Result};
use crate::models::{Course, Student, StudentDraft};

/// A student listed together with the course they belong to.
#[derive(Debug, Clone, Copy)]
pub struct EnrolledStudent<'a> {
    pub course: &'a Course,
    pub student: &'a Student,
}

impl Course {
    /// Sets `registrants` from the roster length.
    pub fn recount_registrants(&mut self) {
        self.registrants = u32::try_from(self.students.len()).unwrap_or(u32::MAX);
    }

    /// Appends a student built from `draft` under `id` and recounts.
    pub(crate) fn enroll(&mut self, id: String, draft: StudentDraft) -> &Student {
        self.students.push(Student {
            id,
            name: draft.name.trim().to_string(),
            phone: draft.phone,
            amount_paid: draft.amount_paid,
            notes: draft.notes,
            custom_data: draft.custom_data,
        });
        self.recount_registrants();
        &self.students[self.students.len() - 1]
    }

    /// Removes the student with `student_id` and recounts.
    pub fn unenroll(&mut self, student_id: &str) -> Result<Student> {
        let index = self
            .students
            .iter()
            .position(|s| s.id == student_id)
            .ok_or_else(|| Error::StudentNotFound {
                id: student_id.to_string(),
            })?;
        let removed = self.students.remove(index);
        self.recount_registrants();
        Ok(removed)
    }

    /// Declares a new custom student column.
    pub fn add_student_column(&mut self, column: &str) -> Result<()> {
        let column = column.trim();
        if column.is_empty() {
            return Err(Error::validation("Column name cannot be empty"));
        }
        if self.student_columns.iter().any(|c| c == column) {
            return Err(Error::validation(format!(
                "Column '{column}' already exists"
            )));
        }
        self.student_columns.push(column.to_string());
        Ok(())
    }

    /// Value of a declared column for `student`; empty when unset or undeclared.
    #[must_use]
    pub fn custom_value<'a>(&self, student: &'a Student, column: &str) -> &'a str {
        if !self.student_columns.iter().any(|c| c == column) {
            return "";
        }
        student.custom_data.get(column).map_or("", String::as_str)
    }

    /// Declared columns paired with the student's values, in column order.
    #[must_use]
    pub fn custom_fields<'a>(&'a self, student: &'a Student) -> Vec<(&'a str, &'a str)> {
        self.student_columns
            .iter()
            .map(|column| (column.as_str(), self.custom_value(student, column)))
            .collect()
    }

    /// Fill rate of the course as a percentage of capacity.
    #[must_use]
    pub fn fill_percent(&self) -> f64 {
        if self.max_capacity == 0 {
            return 0.0;
        }
        f64::from(self.registrants) / f64::from(self.max_capacity) * 100.0
    }
}

/// Every student across all courses, in course order then roster order.
#[must_use]
pub fn all_students(courses: &[Course]) -> Vec<EnrolledStudent<'_>> {
    courses
        .iter()
        .flat_map(|course| {
            course
                .students
                .iter()
                .map(move |student| EnrolledStudent { course, student })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{course_fixture, student_fixture};

    #[test]
    fn test_enroll_recounts_registrants() {
        let mut course = course_fixture("c1", "Course", None, 4, 0);
        course.students = vec![student_fixture("s1", "Dana"), student_fixture("s2", "Omer")];
        course.recount_registrants();
        assert_eq!(course.registrants, 2);

        let student = course.enroll(
            "s3".to_string(),
            StudentDraft {
                name: "  Noa ".to_string(),
                ..StudentDraft::default()
            },
        );
        assert_eq!(student.name, "Noa");
        assert_eq!(course.registrants, 3);
    }

    #[test]
    fn test_unenroll_recounts_registrants() {
        let mut course = course_fixture("c1", "Course", None, 4, 0);
        course.students = vec![
            student_fixture("s1", "Dana"),
            student_fixture("s2", "Omer"),
            student_fixture("s3", "Noa"),
        ];
        course.recount_registrants();

        let removed = course.unenroll("s2").unwrap();
        assert_eq!(removed.name, "Omer");
        assert_eq!(course.registrants, 2);
        assert_eq!(
            course.students.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            vec!["s1", "s3"]
        );
    }

    #[test]
    fn test_unenroll_unknown_student() {
        let mut course = course_fixture("c1", "Course", None, 4, 0);
        let result = course.unenroll("ghost");
        assert!(matches!(result, Err(Error::StudentNotFound { id }) if id == "ghost"));
        assert_eq!(course.registrants, 0);
    }

    #[test]
    fn test_custom_values_follow_declared_columns() {
        let mut course = course_fixture("c1", "Course", None, 4, 0);
        course.student_columns = vec!["Email".to_string(), "City".to_string()];
        let mut student = student_fixture("s1", "Dana");
        student
            .custom_data
            .insert("Email".to_string(), "dana@example.com".to_string());
        student
            .custom_data
            .insert("Shirt".to_string(), "M".to_string());

        assert_eq!(course.custom_value(&student, "Email"), "dana@example.com");
        assert_eq!(course.custom_value(&student, "City"), "");
        assert_eq!(course.custom_value(&student, "Shirt"), "");
        assert_eq!(
            course.custom_fields(&student),
            vec![("Email", "dana@example.com"), ("City", "")]
        );
    }

    #[test]
    fn test_add_student_column_rejects_blank_and_duplicate() {
        let mut course = course_fixture("c1", "Course", None, 4, 0);
        course.add_student_column(" Email ").unwrap();
        assert_eq!(course.student_columns, vec!["Email".to_string()]);

        assert!(matches!(
            course.add_student_column("   "),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            course.add_student_column("Email"),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_fill_percent() {
        let mut course = course_fixture("c1", "Course", None, 4, 0);
        course.max_capacity = 20;
        course.registrants = 5;
        assert_eq!(course.fill_percent(), 25.0);

        course.max_capacity = 0;
        assert_eq!(course.fill_percent(), 0.0);
    }

    #[test]
    fn test_all_students_flattens_in_order() {
        let mut a = course_fixture("a", "A", None, 4, 0);
        a.students = vec![student_fixture("s1", "Dana")];
        let mut b = course_fixture("b", "B", None, 4, 0);
        b.students = vec![student_fixture("s2", "Omer"), student_fixture("s3", "Noa")];
        let courses = vec![a, b];

        let listed: Vec<(&str, &str)> = all_students(&courses)
            .into_iter()
            .map(|e| (e.course.name.as_str(), e.student.name.as_str()))
            .collect();
        assert_eq!(listed, vec![("A", "Dana"), ("B", "Omer"), ("B", "Noa")]);
    }
}
