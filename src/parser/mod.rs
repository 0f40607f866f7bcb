//! Date pattern parsing module
//!
//! This module turns letter-based date patterns into [`DatePattern`] token lists,
//! reads ISO-8601 durations, and parses input text against a compiled pattern.
//! The main entry points are `parse_date_pattern` and `parse_duration`.
//!
//! [`DatePattern`]: crate::types::DatePattern

mod combinators;
mod duration;
mod format;
mod tokens;
mod value;

pub use duration::parse_duration;
pub use format::parse_date_pattern;
pub(crate) use tokens::{gmt_offset_id, offset_id};
pub(crate) use value::parse_instant;
