//! Type definitions for date pattern handling
//!
//! This module defines the type system used to represent compiled date patterns
//! and the locale-specific names used when printing or parsing them.

/// Selects which letter semantics a pattern is compiled with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFlavor {
    /// Letters as understood by formatters of structured temporal values.
    /// Supports optional sections and enforces letter-count limits.
    Modern,
    /// Letters as understood by legacy instant formatters.
    /// `S` counts milliseconds and `u` is the ISO day-of-week number.
    Legacy,
}

/// Represents a single token of a compiled date pattern
#[derive(Debug, Clone, PartialEq)]
pub enum FormatToken {
    /// Era designator, e.g. AD (G)
    Era(u8),
    /// Year of era (y); two letters print the last two digits
    YearOfEra(u8),
    /// Proleptic year, may be negative (u, modern only)
    ProlepticYear(u8),
    /// Month of year (M or L); three letters and more print names
    Month(u8),
    /// Day of month (d)
    DayOfMonth(u8),
    /// Day of year (D)
    DayOfYear(u8),
    /// Day of week name (E)
    DayOfWeekName(u8),
    /// ISO day of week number, Monday is 1 (u, legacy only)
    DayOfWeekNumber(u8),
    /// Quarter of year (Q or q)
    Quarter(u8),
    /// AM/PM marker (a)
    AmPm,
    /// Hour of day, 0-23 (H)
    HourOfDay(u8),
    /// Clock hour of day, 1-24 (k)
    ClockHourOfDay(u8),
    /// Clock hour of AM/PM, 1-12 (h)
    ClockHourOfAmPm(u8),
    /// Hour of AM/PM, 0-11 (K)
    HourOfAmPm(u8),
    /// Minute of hour (m)
    Minute(u8),
    /// Second of minute (s)
    Second(u8),
    /// Fraction of second truncated to the letter count (S, modern)
    FractionOfSecond(u8),
    /// Millisecond count (S, legacy)
    Millisecond(u8),
    /// Nano of second (n)
    NanoOfSecond(u8),
    /// Zone name or abbreviation (z)
    ZoneName(u8),
    /// Zone identifier (VV)
    ZoneId,
    /// Offset as +HHMM (Z)
    OffsetBasic(u8),
    /// ISO-8601 offset (X prints Z for zero, x never does)
    OffsetIso { width: u8, zero_as_z: bool },
    /// Localized offset such as GMT+1 (O)
    LocalizedOffset(u8),
    /// Literal character to print directly
    LiteralChar(char),
    /// Quoted text, like 'at'
    QuotedText(String),
    /// Optional section `[...]`, printed only when all its fields are available
    Optional(Vec<FormatToken>),
}

impl FormatToken {
    /// Checks if the token prints (and parses) as a plain run of digits
    pub fn is_numeric(&self) -> bool {
        match self {
            FormatToken::Month(n) | FormatToken::Quarter(n) => *n <= 2,
            FormatToken::YearOfEra(_)
            | FormatToken::ProlepticYear(_)
            | FormatToken::DayOfMonth(_)
            | FormatToken::DayOfYear(_)
            | FormatToken::DayOfWeekNumber(_)
            | FormatToken::HourOfDay(_)
            | FormatToken::ClockHourOfDay(_)
            | FormatToken::ClockHourOfAmPm(_)
            | FormatToken::HourOfAmPm(_)
            | FormatToken::Minute(_)
            | FormatToken::Second(_)
            | FormatToken::FractionOfSecond(_)
            | FormatToken::Millisecond(_)
            | FormatToken::NanoOfSecond(_) => true,
            _ => false,
        }
    }
}

/// A compiled date pattern
#[derive(Debug, Clone, PartialEq)]
pub struct DatePattern {
    /// The pattern text as written by the caller
    pub source: String,
    /// Letter semantics the pattern was compiled with
    pub flavor: PatternFlavor,
    /// Sequence of pattern tokens
    pub tokens: Vec<FormatToken>,
}

/// Locale-specific names used for printing and parsing dates
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleSettings {
    /// Full month names, January first
    pub month_names: [String; 12],
    /// Abbreviated month names, January first
    pub short_month_names: [String; 12],
    /// Full weekday names, Sunday first
    pub day_names: [String; 7],
    /// Abbreviated weekday names, Sunday first
    pub short_day_names: [String; 7],
    /// AM and PM markers
    pub ampm_markers: [String; 2],
    /// Era names, before and after the epoch of the calendar
    pub era_names: [String; 2],
    /// Full quarter names
    pub quarter_names: [String; 4],
}

fn owned<const N: usize>(values: [&str; N]) -> [String; N] {
    values.map(str::to_string)
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            month_names: owned([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            short_month_names: owned([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            day_names: owned([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            short_day_names: owned(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            ampm_markers: owned(["AM", "PM"]),
            era_names: owned(["BC", "AD"]),
            quarter_names: owned(["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"]),
        }
    }
}

impl LocaleSettings {
    pub fn with_month_names(mut self, names: [&str; 12]) -> Self {
        self.month_names = owned(names);
        self
    }

    pub fn with_short_month_names(mut self, names: [&str; 12]) -> Self {
        self.short_month_names = owned(names);
        self
    }

    pub fn with_day_names(mut self, names: [&str; 7]) -> Self {
        self.day_names = owned(names);
        self
    }

    pub fn with_short_day_names(mut self, names: [&str; 7]) -> Self {
        self.short_day_names = owned(names);
        self
    }

    pub fn with_ampm_markers(mut self, markers: [&str; 2]) -> Self {
        self.ampm_markers = owned(markers);
        self
    }

    pub fn with_era_names(mut self, names: [&str; 2]) -> Self {
        self.era_names = owned(names);
        self
    }

    pub fn with_quarter_names(mut self, names: [&str; 4]) -> Self {
        self.quarter_names = owned(names);
        self
    }
}
