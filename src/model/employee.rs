use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Employee {
    /// generated by the store, rendered as a string in responses
    pub id: i64,
    /// business identifier, immutable once created
    pub employee_id: String,
    pub full_name: String,
    /// always lowercase
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

/// Validated employee fields ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}
