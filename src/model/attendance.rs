use chrono::{DateTime, NaiveDate, Utc};
use strum::{Display, EnumString, IntoStaticStr};

/// Stored as lowercase text, the column's CHECK constraint admits nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr, sqlx::Type)]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Stored form.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Human readable form used in responses.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Attendance {
    pub id: i64,
    /// Business id of the employee. Looked up by value, the row outlives the employee.
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAttendance {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Inclusive date bounds, each side optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }
}
