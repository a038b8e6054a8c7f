//! Input validation for create requests.
//!
//! Bodies arrive as raw JSON so a missing field, a blank one and a wrong type can each be
//! reported against the field name. Every problem is collected before returning.

use crate::model::attendance::{AttendanceStatus, NewAttendance};
use crate::model::employee::NewEmployee;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;
use validator::ValidateEmail;

pub const MAX_EMPLOYEE_ID_LEN: usize = 32;
pub const MAX_FULL_NAME_LEN: usize = 120;
pub const MAX_DEPARTMENT_LEN: usize = 80;
pub const MAX_EMAIL_LEN: usize = 254;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";
const NULL: &str = "This field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const INVALID_EMAIL: &str = "Enter a valid email address.";
const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const INVALID_STATUS: &str = "Status must be 'present' or 'absent'.";

/// Field name to messages, serialized as the response body of a rejected create.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }
}

pub fn validate_new_employee(body: &Value) -> Result<NewEmployee, FieldErrors> {
    let obj = as_object(body)?;
    let mut errors = FieldErrors::default();

    let employee_id = required_text(obj, "employee_id", MAX_EMPLOYEE_ID_LEN, &mut errors);
    let full_name = required_text(obj, "full_name", MAX_FULL_NAME_LEN, &mut errors);
    let email = required_text(obj, "email", MAX_EMAIL_LEN, &mut errors).and_then(|email| {
        match normalize_email(&email) {
            Some(email) => Some(email),
            None => {
                errors.add("email", INVALID_EMAIL);
                None
            }
        }
    });
    let department = required_text(obj, "department", MAX_DEPARTMENT_LEN, &mut errors);

    match (employee_id, full_name, email, department) {
        (Some(employee_id), Some(full_name), Some(email), Some(department))
            if errors.is_empty() =>
        {
            Ok(NewEmployee {
                employee_id,
                full_name,
                email,
                department,
            })
        }
        _ => Err(errors),
    }
}

pub fn validate_new_attendance(body: &Value) -> Result<NewAttendance, FieldErrors> {
    let obj = as_object(body)?;
    let mut errors = FieldErrors::default();

    let date = required_text(obj, "date", usize::MAX, &mut errors).and_then(|raw| {
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("date", INVALID_DATE);
                None
            }
        }
    });
    let status = required_text(obj, "status", usize::MAX, &mut errors).and_then(|raw| {
        match parse_status(&raw) {
            Ok(status) => Some(status),
            Err(message) => {
                errors.add("status", message);
                None
            }
        }
    });

    match (date, status) {
        (Some(date), Some(status)) if errors.is_empty() => Ok(NewAttendance { date, status }),
        _ => Err(errors),
    }
}

/// Case-folds before matching, so `"Present"` and `"ABSENT"` are accepted.
pub fn parse_status(raw: &str) -> Result<AttendanceStatus, &'static str> {
    AttendanceStatus::from_str(&raw.trim().to_lowercase()).map_err(|_| INVALID_STATUS)
}

/// Lowercased address, or `None` when it is not a valid email. Bare hosts like
/// `localhost` and IP literals are accepted.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    email.validate_email().then_some(email)
}

/// Query string dates. Anything that does not parse is treated as no bound at all.
pub fn parse_date_param(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    body.as_object().ok_or_else(|| {
        let message = format!(
            "Invalid data. Expected a dictionary, but got {}.",
            json_type_name(body)
        );
        FieldErrors::single("non_field_errors", &message)
    })
}

// Named the way the Python serializer reports them
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn required_text(
    obj: &Map<String, Value>,
    field: &str,
    max_len: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let text = match obj.get(field) {
        None => {
            errors.add(field, REQUIRED);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, NULL);
            return None;
        }
        Some(Value::String(s)) => s.trim().to_string(),
        // numbers are accepted as their textual form
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            errors.add(field, NOT_A_STRING);
            return None;
        }
    };

    if text.is_empty() {
        errors.add(field, BLANK);
        return None;
    }
    if text.chars().count() > max_len {
        errors.add(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        );
        return None;
    }
    Some(text)
}
