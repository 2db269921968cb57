//! Schedule milestones
//!
//! A [`Date`] is a typed milestone holding either a single day or an inclusive
//! range of days. Dates are written as `05-Jan-2024`; ISO `2024-01-05` is
//! accepted on input as well.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SeretoError;

/// Output format of a date
const DATE_FORMAT: &str = "%d-%b-%Y";

/// Alternative formats accepted on input
const INPUT_FORMATS: [&str; 3] = [DATE_FORMAT, "%Y-%m-%d", "%d-%m-%Y"];

/// Kind of a schedule milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateType {
    /// Statement of work was sent to the client
    SowSent,
    /// The assessment itself
    PentestOngoing,
    /// Internal review of the report
    Review,
    /// Meeting with the client (kick-off, wrap-up)
    Meeting,
    /// Report delivered to the client
    ReportSent,
}

impl DateType {
    /// All date kinds in display order
    pub const ALL: [Self; 5] =
        [Self::SowSent, Self::PentestOngoing, Self::Review, Self::Meeting, Self::ReportSent];
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SowSent => write!(f, "sow_sent"),
            Self::PentestOngoing => write!(f, "pentest_ongoing"),
            Self::Review => write!(f, "review"),
            Self::Meeting => write!(f, "meeting"),
            Self::ReportSent => write!(f, "report_sent"),
        }
    }
}

impl FromStr for DateType {
    type Err = SeretoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sow_sent" | "sow" => Ok(Self::SowSent),
            "pentest_ongoing" | "pentest" => Ok(Self::PentestOngoing),
            "review" => Ok(Self::Review),
            "meeting" => Ok(Self::Meeting),
            "report_sent" | "report" => Ok(Self::ReportSent),
            _ => Err(SeretoError::parse(
                "date type",
                format!("{s}. Use: sow_sent, pentest_ongoing, review, meeting, report_sent"),
            )),
        }
    }
}

/// A calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeretoDate(NaiveDate);

impl SeretoDate {
    /// Create a date from year, month and day
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, SeretoError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| SeretoError::parse("date", format!("{year:04}-{month:02}-{day:02}")))
    }
}

impl From<NaiveDate> for SeretoDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for SeretoDate {
    type Err = SeretoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .map(Self)
            .ok_or_else(|| {
                SeretoError::parse("date", format!("'{s}' (expected e.g. 05-Jan-2024 or 2024-01-05)"))
            })
    }
}

impl fmt::Display for SeretoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for SeretoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SeretoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive range of days, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: SeretoDate,
    end: SeretoDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: SeretoDate,
    end: SeretoDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = SeretoError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Create a range, rejecting `end < start`
    pub fn new(start: SeretoDate, end: SeretoDate) -> Result<Self, SeretoError> {
        if end < start {
            return Err(SeretoError::parse(
                "date range",
                format!("end ({end}) must not be before start ({start})"),
            ));
        }
        Ok(Self { start, end })
    }

    /// First day of the range
    #[must_use]
    pub const fn start(&self) -> SeretoDate {
        self.start
    }

    /// Last day of the range
    #[must_use]
    pub const fn end(&self) -> SeretoDate {
        self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Value of a milestone: one day or a range of days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// Single day
    Single(SeretoDate),
    /// Inclusive range
    Range(DateRange),
}

impl DateValue {
    /// Check whether the value lies entirely within the inclusive bounds.
    ///
    /// A range must be fully contained: both of its endpoints have to satisfy
    /// the bounds, partial overlap does not count.
    #[must_use]
    pub fn within(&self, start: Option<SeretoDate>, end: Option<SeretoDate>) -> bool {
        let (first, last) = match self {
            Self::Single(d) => (*d, *d),
            Self::Range(r) => (r.start, r.end),
        };
        start.is_none_or(|s| first >= s) && end.is_none_or(|e| last <= e)
    }
}

impl From<SeretoDate> for DateValue {
    fn from(date: SeretoDate) -> Self {
        Self::Single(date)
    }
}

impl From<DateRange> for DateValue {
    fn from(range: DateRange) -> Self {
        Self::Range(range)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(d) => write!(f, "{d}"),
            Self::Range(r) => write!(f, "{r}"),
        }
    }
}

/// A typed schedule milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Date {
    /// Kind of milestone
    #[serde(rename = "type")]
    pub kind: DateType,
    /// When it happens
    pub date: DateValue,
}

impl Date {
    /// Create a milestone
    #[must_use]
    pub fn new(kind: DateType, date: impl Into<DateValue>) -> Self {
        Self {
            kind,
            date: date.into(),
        }
    }
}

/// Filter bound given either as a parsed date or as a string to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound<'a> {
    /// Already parsed
    Date(SeretoDate),
    /// Parsed on use
    Text(&'a str),
}

impl DateBound<'_> {
    /// Resolve the bound to a date
    pub fn resolve(self) -> Result<SeretoDate, SeretoError> {
        match self {
            Self::Date(d) => Ok(d),
            Self::Text(s) => s.parse(),
        }
    }
}

impl From<SeretoDate> for DateBound<'_> {
    fn from(date: SeretoDate) -> Self {
        Self::Date(date)
    }
}

impl<'a> From<&'a str> for DateBound<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}
