use crate::domain::entry::Entry;
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// Trailing windows offered by the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    AllTime,
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::AllTime,
        Period::Week,
        Period::Month,
        Period::Quarter,
        Period::Year,
    ];

    /// Length of the window, `None` for all time.
    pub fn days(&self) -> Option<i64> {
        match self {
            Period::AllTime => None,
            Period::Week => Some(7),
            Period::Month => Some(31),
            // round(365 / 4)
            Period::Quarter => Some(91),
            Period::Year => Some(365),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::AllTime => "All Time",
            Period::Week => "Week",
            Period::Month => "Month",
            Period::Quarter => "Quarter",
            Period::Year => "Year",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::AllTime => "all",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Period::AllTime => Period::Week,
            Period::Week => Period::Month,
            Period::Month => Period::Quarter,
            Period::Quarter => Period::Year,
            Period::Year => Period::AllTime,
        }
    }

    pub fn cutoff(&self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        self.days().map(|days| now - Duration::days(days))
    }

    /// Entries that started strictly after the cutoff.
    pub fn filter<'a>(&self, entries: &'a [Entry], now: OffsetDateTime) -> Vec<&'a Entry> {
        match self.cutoff(now) {
            Some(cutoff) => entries.iter().filter(|x| cutoff < x.start).collect(),
            None => entries.iter().collect(),
        }
    }

    /// The range to ask the server for.
    pub fn range(&self, now: OffsetDateTime) -> DateRange {
        DateRange {
            start: self.cutoff(now).unwrap_or(OffsetDateTime::UNIX_EPOCH),
            end: now,
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "all-time" => Ok(Self::AllTime),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            _ => Err(format!("unknown period {s:?}")),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive range over entry start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl DateRange {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.start <= entry.start && entry.start <= self.end
    }

    pub fn filter<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        entries.iter().filter(|x| self.contains(x)).collect()
    }
}
