//! Host values and their classification into filter inputs

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::temporal::{LegacyInstant, Temporal};

/// A dynamic value handed over by the template engine
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Temporal(Temporal),
    Instant(LegacyInstant),
}

impl Value {
    /// Runtime type name, as reported in errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Temporal(value) => match value {
                Temporal::Date(_) => "LocalDate",
                Temporal::Time(_) => "LocalTime",
                Temporal::DateTime(_) => "LocalDateTime",
                Temporal::Zoned(_) => "ZonedDateTime",
                Temporal::Offset(_) => "OffsetDateTime",
                Temporal::Instant(_) => "Instant",
            },
            Value::Instant(_) => "Date",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
            Value::Temporal(value) => write!(f, "{value}"),
            Value::Instant(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<LegacyInstant> for Value {
    fn from(value: LegacyInstant) -> Self {
        Value::Instant(value)
    }
}

impl From<Temporal> for Value {
    fn from(value: Temporal) -> Self {
        Value::Temporal(value)
    }
}

macro_rules! temporal_value_from {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::Temporal(Temporal::from(value))
                }
            }
        )*
    };
}

temporal_value_from!(
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    DateTime<Tz>,
    DateTime<FixedOffset>,
    DateTime<Utc>
);

/// The input of a filter call, classified once
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalInput {
    Structured(Temporal),
    Legacy(LegacyInstant),
    /// Milliseconds since the epoch
    Epoch(i64),
    /// Anything else that is not null; only usable with `existingFormat`
    Text { type_name: String, text: String },
}

impl TemporalInput {
    /// `None` for null values. Floats truncate toward zero.
    pub fn classify(value: &Value) -> Option<TemporalInput> {
        let input = match value {
            Value::Null => return None,
            Value::Temporal(temporal) => TemporalInput::Structured(temporal.clone()),
            Value::Instant(instant) => TemporalInput::Legacy(*instant),
            Value::Integer(millis) => TemporalInput::Epoch(*millis),
            Value::Float(millis) => TemporalInput::Epoch(millis.trunc() as i64),
            Value::Bool(_) | Value::String(_) => TemporalInput::Text {
                type_name: value.type_name().to_string(),
                text: value.to_string(),
            },
        };
        Some(input)
    }

    pub fn type_name(&self) -> String {
        match self {
            TemporalInput::Structured(value) => Value::Temporal(value.clone()).type_name().to_string(),
            TemporalInput::Legacy(_) => "Date".to_string(),
            TemporalInput::Epoch(_) => "integer".to_string(),
            TemporalInput::Text { type_name, .. } => type_name.clone(),
        }
    }

    /// The text a pattern-driven parse reads
    pub fn text(&self) -> String {
        match self {
            TemporalInput::Structured(value) => value.to_string(),
            TemporalInput::Legacy(instant) => instant.to_string(),
            TemporalInput::Epoch(millis) => millis.to_string(),
            TemporalInput::Text { text, .. } => text.clone(),
        }
    }
}
