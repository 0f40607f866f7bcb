//! Error types for the date filter.
//!
//! Component errors carry no source location; the dispatcher attaches the
//! template name and line number when it surfaces them as [`DateFilterError`].

use std::fmt;

use thiserror::Error;

use crate::temporal::TemporalKind;

/// Template name and line of the filter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub template_name: String,
    pub line_number: usize,
}

impl SourceLocation {
    pub fn new(template_name: impl Into<String>, line_number: usize) -> Self {
        Self {
            template_name: template_name.into(),
            line_number,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.template_name, self.line_number)
    }
}

/// Discriminant of [`DateFilterError`] for programmatic checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedInputType,
    Parse,
    Format,
    InvalidZoneId,
    InvalidDurationString,
    InvalidPattern,
    InvalidArgument,
    OutOfRange,
}

/// Errors surfaced to the host template engine.
#[derive(Error, Debug)]
pub enum DateFilterError {
    /// The legacy path received a value that is not an instant or a number
    #[error("Unsupported argument type: {type_name} (value: {value}) ({location})")]
    UnsupportedInputType {
        type_name: String,
        value: String,
        location: SourceLocation,
    },
    /// The input text did not match `existingFormat`
    #[error("Could not parse the string '{input}' into a date. ({location})")]
    Parse {
        input: String,
        location: SourceLocation,
        source: ValueParseError,
    },
    /// The pattern needs a field the temporal value does not have
    #[error("Could not format instance '{value}' of type {kind} into a date. ({location})")]
    Format {
        value: String,
        kind: TemporalKind,
        location: SourceLocation,
        source: FieldError,
    },
    #[error("Invalid time zone '{zone}' ({location})")]
    InvalidZoneId {
        zone: String,
        location: SourceLocation,
        source: ZoneError,
    },
    #[error("Text '{input}' cannot be parsed to a duration ({location})")]
    InvalidDurationString {
        input: String,
        location: SourceLocation,
        source: DurationError,
    },
    #[error("Invalid date pattern '{pattern}' ({location})")]
    InvalidPattern {
        pattern: String,
        location: SourceLocation,
        source: PatternError,
    },
    /// A named argument was bound to something other than a string
    #[error("Argument '{name}' must be a string, got {type_name} ({location})")]
    InvalidArgument {
        name: String,
        type_name: String,
        location: SourceLocation,
    },
    #[error("Could not shift '{value}' ({location})")]
    OutOfRange {
        value: String,
        location: SourceLocation,
        source: ShiftError,
    },
}

impl DateFilterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DateFilterError::UnsupportedInputType { .. } => ErrorKind::UnsupportedInputType,
            DateFilterError::Parse { .. } => ErrorKind::Parse,
            DateFilterError::Format { .. } => ErrorKind::Format,
            DateFilterError::InvalidZoneId { .. } => ErrorKind::InvalidZoneId,
            DateFilterError::InvalidDurationString { .. } => ErrorKind::InvalidDurationString,
            DateFilterError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            DateFilterError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            DateFilterError::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            DateFilterError::UnsupportedInputType { location, .. }
            | DateFilterError::Parse { location, .. }
            | DateFilterError::Format { location, .. }
            | DateFilterError::InvalidZoneId { location, .. }
            | DateFilterError::InvalidDurationString { location, .. }
            | DateFilterError::InvalidPattern { location, .. }
            | DateFilterError::InvalidArgument { location, .. }
            | DateFilterError::OutOfRange { location, .. } => location,
        }
    }
}

/// Failure to compile a date pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Unknown pattern letter: {0}")]
    UnknownLetter(char),
    #[error("Too many pattern letters: {letter} (count {count})")]
    TooManyLetters { letter: char, count: usize },
    #[error("Invalid pattern syntax at offset {offset}")]
    Syntax { offset: usize },
}

/// Failure to read an ISO-8601 duration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("malformed duration at offset {offset}")]
    Malformed { offset: usize },
    #[error("duration is too large")]
    Overflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("Unknown time-zone ID: {0}")]
    UnknownZone(String),
}

/// A field a pattern asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Time,
    OffsetSeconds,
    ZoneId,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "Date",
            Field::Time => "Time",
            Field::OffsetSeconds => "OffsetSeconds",
            Field::ZoneId => "ZoneId",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unsupported field: {0}")]
    Unsupported(Field),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftError {
    #[error("a {0} value cannot be shifted by a sub-day amount")]
    SubDayUnsupported(TemporalKind),
    #[error("shift leaves the supported range")]
    Overflow,
}

/// Failure to read input text against a pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueParseError {
    #[error("Unparseable date: \"{text}\" (at offset {offset})")]
    Unparseable { text: String, offset: usize },
    #[error("Date fields of \"{text}\" do not form a valid date")]
    InvalidFields { text: String },
}
