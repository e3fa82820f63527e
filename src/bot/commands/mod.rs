//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Session calendar commands
pub mod calendar;

/// Course and roster commands
pub mod course;

/// Save and backup commands
pub mod data;

/// Monthly financial record commands
pub mod finance;

/// General utility commands
pub mod general;

/// Payment link commands
pub mod links;

/// Task and team commands
pub mod task;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use calendar::*;
pub use course::*;
pub use data::*;
pub use finance::*;
pub use general::*;
pub use links::*;
pub use task::*;

/// Every command the bot registers, in help order.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        overview(),
        ask(),
        courses(),
        course_add(),
        course_edit(),
        course_status(),
        course_delete(),
        students(),
        student_find(),
        student_add(),
        student_remove(),
        student_column_add(),
        tasks(),
        task_add(),
        task_edit(),
        task_toggle(),
        task_delete(),
        team(),
        member(),
        member_contact(),
        day(),
        month(),
        finance(),
        finance_set(),
        finance_sync(),
        links(),
        link_add(),
        link_delete(),
        save(),
        backup(),
    ]
}
