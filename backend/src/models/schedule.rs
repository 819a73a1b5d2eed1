use serde::Serialize;

use crate::models::course::CourseId;
use crate::status::CourseStatus;

/// One row of a trainer's schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub course_id: CourseId,
    pub course_title: String,
    pub start_date: String,
    pub end_date: String,
    pub status: CourseStatus,
    pub sort_order: u8,
}
