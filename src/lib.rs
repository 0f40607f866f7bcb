pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod input;
pub mod locale;
pub mod parser;
pub mod shift;
pub mod temporal;
pub mod types;
pub mod zone;

// Main API
pub use config::{ConfigError, FilterConfig};
pub use error::{DateFilterError, ErrorKind, SourceLocation};
pub use filter::{DateFilter, EvaluationContext, FilterArgs, FormatOptions, SafeString, format_input};
pub use formatter::DateFormatter;
pub use input::{TemporalInput, Value};
pub use parser::{parse_date_pattern, parse_duration};
pub use shift::ShiftSpec;
pub use temporal::{LegacyInstant, Temporal, TemporalKind};
pub use types::*;
pub use zone::ResolvedZone;
