use crate::domain::entry::Entry;
use serde_json::Value;
use std::collections::BTreeMap;
use timesheet_common::api::{SummaryResponse, SUMMARY_WHITELIST};

/// Statistics over the entries currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total_days: usize,
    pub total_hours: f64,
    pub average_day: f64,
}

impl Summary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let (total_days, total_hours) = entries
            .into_iter()
            .fold((0, 0.0), |(days, hours), x| (days + 1, hours + x.hours_worked()));

        let average_day = if total_days == 0 {
            0.0
        } else {
            total_hours / total_days as f64
        };

        Self {
            total_days,
            total_hours,
            average_day,
        }
    }
}

/// Round to one decimal place for display.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The server computed summary, reduced to the keys the client shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteSummary(BTreeMap<String, Value>);

impl RemoteSummary {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<SummaryResponse> for RemoteSummary {
    fn from(value: SummaryResponse) -> Self {
        Self(
            value
                .into_iter()
                .filter(|(key, _)| SUMMARY_WHITELIST.contains(&key.as_str()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;
    use time::Duration;

    #[test]
    fn totals_and_average() {
        let entries = vec![
            Entry::new(
                datetime!(2018-10-06 08:05 UTC),
                Some(datetime!(2018-10-06 17:05 UTC)),
                Duration::minutes(30),
            ),
            Entry::new(
                datetime!(2018-09-06 08:00 UTC),
                Some(datetime!(2018-09-06 16:00 UTC)),
                Duration::minutes(30),
            ),
        ];

        let summary = Summary::from_entries(&entries);
        assert_eq!(summary.total_days, 2);
        assert_eq!(summary.total_hours, 16.0);
        assert_eq!(summary.average_day, 8.0);
    }

    #[test]
    fn empty_summary_has_no_average() {
        let summary = Summary::from_entries(&Vec::<Entry>::new());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn rounds_to_tenths() {
        assert_eq!(round_tenths(8.4666), 8.5);
        assert_eq!(round_tenths(0.04), 0.0);
    }

    #[test]
    fn whitelist_drops_unknown_keys() {
        let response = json!({
            "times": 12,
            "total-hours": 96.5,
            "average-day": 8.04,
            "password-hash": "nope",
            "error": null,
        });
        let map = match response {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let summary = RemoteSummary::from(map);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.get("times"), Some(&json!(12)));
        assert_eq!(summary.get("password-hash"), None);
    }
}
