use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{CourseListing, CourseRecord, Trainer, TrainerSummary};

/// Column layout of `GET /courses/with-trainers`.
mod course_col {
    pub const ID: usize = 0;
    pub const TITLE: usize = 1;
    pub const DESCRIPTION: usize = 2;
    pub const START_DATE: usize = 3;
    pub const END_DATE: usize = 4;
    pub const CAPACITY: usize = 5;
    pub const STATUS: usize = 6;
    pub const TRAINER_FIRST_NAME: usize = 7;
    pub const TRAINER_LAST_NAME: usize = 8;
    pub const TRAINER_EMAIL: usize = 9;
    pub const ENROLLED: usize = 10;
}

/// Column layout of `GET /trainers`.
mod trainer_col {
    pub const ID: usize = 0;
    pub const FIRST_NAME: usize = 1;
    pub const LAST_NAME: usize = 2;
    pub const EMAIL: usize = 3;
    pub const PHONE: usize = 4;
    pub const AGE: usize = 5;
    pub const LOCATION: usize = 6;
    pub const EXPERIENCE: usize = 7;
}

/// A positional row from one of the upstream native-query endpoints.
#[derive(Debug, Clone)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Array(items) => Ok(Self(items)),
            other => Err(AppError::Decode(format!("expected a positional row, got {}", other))),
        }
    }

    fn get(&self, idx: usize) -> Option<&Value> {
        self.0.get(idx).filter(|v| !v.is_null())
    }

    pub fn int(&self, idx: usize) -> Option<i64> {
        match self.get(idx)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn text(&self, idx: usize) -> Option<String> {
        match self.get(idx)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn date(&self, idx: usize) -> Option<String> {
        self.get(idx).and_then(date_from_value)
    }
}

/// Dates come either as strings or as epoch milliseconds, depending on how
/// the upstream serializer was configured.
pub fn date_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339()),
        _ => None,
    }
}

pub fn course_listing_from_row(row: &Row) -> Result<CourseListing, AppError> {
    let id = row
        .int(course_col::ID)
        .ok_or_else(|| AppError::Decode("course row without an id".to_string()))?;

    let trainer = row
        .text(course_col::TRAINER_FIRST_NAME)
        .filter(|name| !name.is_empty())
        .map(|first_name| TrainerSummary {
            trainer_id: None,
            first_name,
            last_name: row.text(course_col::TRAINER_LAST_NAME).unwrap_or_default(),
            email: row.text(course_col::TRAINER_EMAIL).unwrap_or_default(),
        });

    Ok(CourseListing {
        id,
        title: row.text(course_col::TITLE).unwrap_or_default(),
        description: row.text(course_col::DESCRIPTION).unwrap_or_default(),
        start_date: row.date(course_col::START_DATE).unwrap_or_default(),
        end_date: row.date(course_col::END_DATE).unwrap_or_default(),
        capacity: row.int(course_col::CAPACITY),
        status_hint: row.text(course_col::STATUS),
        trainer,
        enrolled_aggregate: row.int(course_col::ENROLLED),
    })
}

pub fn trainer_from_row(row: &Row) -> Result<Trainer, AppError> {
    let id = row
        .int(trainer_col::ID)
        .ok_or_else(|| AppError::Decode("trainer row without an id".to_string()))?;

    Ok(Trainer {
        id,
        first_name: row.text(trainer_col::FIRST_NAME).unwrap_or_default(),
        last_name: row.text(trainer_col::LAST_NAME).unwrap_or_default(),
        email: row.text(trainer_col::EMAIL).unwrap_or_default(),
        phone_number: row.text(trainer_col::PHONE),
        age: row.int(trainer_col::AGE),
        location: row.text(trainer_col::LOCATION),
        experience: row.text(trainer_col::EXPERIENCE),
    })
}

/// `GET /courses/{id}` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecordWire {
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<Value>,
    #[serde(default)]
    pub end_date: Option<Value>,
    #[serde(default)]
    pub max_capacity: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl From<CourseRecordWire> for CourseRecord {
    fn from(wire: CourseRecordWire) -> Self {
        Self {
            id: wire.course_id,
            title: wire.title.unwrap_or_default(),
            description: wire.description,
            start_date: wire.start_date.as_ref().and_then(date_from_value),
            end_date: wire.end_date.as_ref().and_then(date_from_value),
            capacity: wire.max_capacity,
            status: wire.status,
            level: wire.level,
        }
    }
}
