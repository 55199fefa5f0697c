use crate::error::{ApiError, ApiResult, EntryError};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use timesheet_common::api::{EntryPayload, WireId};
use uuid::Uuid;

const DRAFT_PREFIX: &str = "draft-";
const DAY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

/// Server id of an entry, or a local draft id for entries the server has not
/// confirmed yet. Ids compare by their text; a numeric server id is sent back
/// as a number.
#[derive(Debug, Clone)]
pub struct EntryId {
    value: String,
    numeric: bool,
}

impl EntryId {
    pub fn draft() -> Self {
        Self::from(format!("{DRAFT_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn is_draft(&self) -> bool {
        self.value.starts_with(DRAFT_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The id as it goes over the wire, `None` for drafts.
    pub fn to_wire(&self) -> Option<WireId> {
        if self.is_draft() {
            return None;
        }

        match self.value.parse() {
            Ok(number) if self.numeric => Some(WireId::Number(number)),
            _ => Some(WireId::Text(self.value.clone())),
        }
    }
}

impl PartialEq for EntryId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EntryId {}

impl std::hash::Hash for EntryId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for EntryId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntryId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self {
            value,
            numeric: false,
        }
    }
}

impl From<WireId> for EntryId {
    fn from(value: WireId) -> Self {
        match value {
            WireId::Number(number) => Self {
                value: number.to_string(),
                numeric: true,
            },
            WireId::Text(value) => Self::from(value),
        }
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Free text attached to an entry. Older entries split the day into a
/// morning and an afternoon, newer ones carry a single description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notes {
    Halves { morning: String, afternoon: String },
    Description(String),
}

impl Default for Notes {
    fn default() -> Self {
        Notes::Halves {
            morning: String::new(),
            afternoon: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub start: OffsetDateTime,
    pub end: Option<OffsetDateTime>,
    pub breaks: Duration,
    pub notes: Notes,
}

impl Entry {
    pub fn new(start: OffsetDateTime, end: Option<OffsetDateTime>, breaks: Duration) -> Self {
        Self {
            id: EntryId::draft(),
            start,
            end,
            breaks,
            notes: Notes::default(),
        }
    }

    pub fn id(mut self, id: EntryId) -> Self {
        self.id = id;
        self
    }

    pub fn notes(mut self, notes: Notes) -> Self {
        self.notes = notes;
        self
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    pub fn validate(&self) -> Result<(), EntryError> {
        if let Some(end) = self.end {
            if self.start > end {
                return Err(EntryError::EndsBeforeStart);
            }
        }
        if self.breaks.is_negative() {
            return Err(EntryError::NegativeBreaks);
        }
        Ok(())
    }

    /// Time between start and end minus breaks. An open entry has worked nothing yet.
    pub fn worked(&self) -> Duration {
        match self.end {
            Some(end) => (end - self.start) - self.breaks,
            None => Duration::ZERO,
        }
    }

    pub fn hours_worked(&self) -> f64 {
        self.worked().as_seconds_f64() / 3600.0
    }

    pub fn to_payload(&self) -> EntryPayload {
        let (morning, afternoon, description) = match &self.notes {
            Notes::Halves { morning, afternoon } => {
                (Some(morning.clone()), Some(afternoon.clone()), None)
            }
            Notes::Description(v) => (None, None, Some(v.clone())),
        };

        EntryPayload {
            id: self.id.to_wire(),
            start: self.start,
            end: self.end,
            breaks: self.breaks.whole_minutes(),
            morning,
            afternoon,
            description,
        }
    }

    pub fn from_payload(payload: EntryPayload) -> ApiResult<Self> {
        let id = payload
            .id
            .map(EntryId::from)
            .ok_or_else(|| ApiError::Malformed("entry without an id".into()))?;
        let notes = match payload.description {
            Some(description) => Notes::Description(description),
            None => Notes::Halves {
                morning: payload.morning.unwrap_or_default(),
                afternoon: payload.afternoon.unwrap_or_default(),
            },
        };

        Ok(Self {
            id,
            start: payload.start,
            end: payload.end,
            breaks: Duration::minutes(payload.breaks),
            notes,
        })
    }
}

/// Field values of the entry edit form, as the user types them.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub day: String,
    pub start: String,
    /// `None` keeps the entry open.
    pub end: Option<String>,
    /// Days between `day` and the day the entry ends on.
    pub end_day_offset: i64,
    pub breaks: i64,
    pub notes: Notes,
}

impl EntryForm {
    /// Defaults for a new entry: starting now, eight hours long, no breaks.
    /// The end is kept on the same day so the defaults always validate.
    pub fn blank(now: OffsetDateTime) -> Self {
        let end_of_day = now.replace_time(Time::from_hms(23, 59, 0).unwrap_or(Time::MIDNIGHT));
        let end = (now + Duration::hours(8)).min(end_of_day).max(now);

        Self {
            day: format_day(now.date()),
            start: format_time(now.time()),
            end: Some(format_time(end.time())),
            end_day_offset: 0,
            breaks: 0,
            notes: Notes::default(),
        }
    }

    pub fn from_entry(entry: &Entry, offset: UtcOffset) -> Self {
        let start = entry.start.to_offset(offset);
        let end = entry.end.map(|x| x.to_offset(offset));

        Self {
            day: format_day(start.date()),
            start: format_time(start.time()),
            end: end.map(|x| format_time(x.time())),
            end_day_offset: end.map_or(0, |x| (x.date() - start.date()).whole_days()),
            breaks: entry.breaks.whole_minutes(),
            notes: entry.notes.clone(),
        }
    }

    /// Combine the day with the start and end times in `offset`, then validate.
    pub fn into_entry(self, id: EntryId, offset: UtcOffset) -> Result<Entry, EntryError> {
        let day = Date::parse(self.day.trim(), DAY_FORMAT).map_err(|_| {
            EntryError::InvalidField {
                field: "day",
                value: self.day.clone(),
            }
        })?;
        let start = parse_time("start", &self.start)?;
        let end = match &self.end {
            Some(value) => {
                let time = parse_time("end", value)?;
                let end_day = day
                    .checked_add(Duration::days(self.end_day_offset))
                    .ok_or_else(|| EntryError::InvalidField {
                        field: "day",
                        value: self.day.clone(),
                    })?;
                Some(PrimitiveDateTime::new(end_day, time).assume_offset(offset))
            }
            None => None,
        };

        let entry = Entry {
            id,
            start: PrimitiveDateTime::new(day, start).assume_offset(offset),
            end,
            breaks: Duration::minutes(self.breaks),
            notes: self.notes,
        };
        entry.validate()?;

        Ok(entry)
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<Time, EntryError> {
    Time::parse(value.trim(), TIME_FORMAT).map_err(|_| EntryError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn format_day(date: Date) -> String {
    date.format(DAY_FORMAT).unwrap_or_default()
}

fn format_time(time: Time) -> String {
    time.format(TIME_FORMAT).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    fn workday() -> Entry {
        Entry::new(
            datetime!(2018-10-06 08:05 UTC),
            Some(datetime!(2018-10-06 17:05 UTC)),
            Duration::minutes(30),
        )
    }

    #[test]
    fn worked_subtracts_breaks() {
        let entry = workday();
        assert_eq!(entry.worked(), Duration::hours(8) + Duration::minutes(30));
        assert_eq!(entry.hours_worked(), 8.5);
    }

    #[test]
    fn open_entry_has_worked_nothing() {
        let entry = Entry::new(datetime!(2018-10-06 08:05 UTC), None, Duration::ZERO);
        assert!(entry.is_open());
        assert_eq!(entry.worked(), Duration::ZERO);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn ending_before_start_is_rejected() {
        let mut entry = workday();
        entry.end = Some(datetime!(2018-10-06 07:00 UTC));
        assert_eq!(entry.validate(), Err(EntryError::EndsBeforeStart));
        assert_eq!(
            entry.validate().unwrap_err().to_string(),
            "You can't end before you've started"
        );
    }

    #[test]
    fn negative_breaks_are_rejected() {
        let mut entry = workday();
        entry.breaks = Duration::minutes(-5);
        assert_eq!(entry.validate(), Err(EntryError::NegativeBreaks));
    }

    #[test]
    fn zero_length_entry_is_valid() {
        let start = datetime!(2018-10-06 08:05 UTC);
        let entry = Entry::new(start, Some(start), Duration::ZERO);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn drafts_are_sent_without_an_id() {
        let payload = workday().to_payload();
        assert_eq!(payload.id, None);
        assert_eq!(payload.breaks, 30);
        assert_eq!(payload.morning.as_deref(), Some(""));
        assert_eq!(payload.description, None);
    }

    #[test]
    fn description_wins_over_halves_on_the_wire() {
        let payload = EntryPayload {
            id: Some(WireId::Number(7)),
            start: datetime!(2018-09-06 08:44 UTC),
            end: Some(datetime!(2018-09-06 17:32 UTC)),
            breaks: 35,
            morning: Some("ignored".into()),
            afternoon: None,
            description: Some("Knocked off early".into()),
        };

        let entry = Entry::from_payload(payload).unwrap();
        assert_eq!(entry.id, EntryId::from("7"));
        assert_eq!(entry.breaks, Duration::minutes(35));
        assert_eq!(entry.notes, Notes::Description("Knocked off early".into()));
    }

    #[test]
    fn payload_without_id_is_malformed() {
        let mut payload = workday().to_payload();
        payload.id = None;
        assert!(matches!(
            Entry::from_payload(payload),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn form_combines_day_and_times() {
        let form = EntryForm {
            day: "2018-10-06".into(),
            start: "08:05".into(),
            end: Some("17:05".into()),
            end_day_offset: 0,
            breaks: 30,
            notes: Notes::Description("Wrote code".into()),
        };

        let entry = form.into_entry(EntryId::from("3"), offset!(+2)).unwrap();
        assert_eq!(entry.start, datetime!(2018-10-06 08:05 +2));
        assert_eq!(entry.end, Some(datetime!(2018-10-06 17:05 +2)));
        assert_eq!(entry.hours_worked(), 8.5);
    }

    #[test]
    fn form_reports_the_bad_field() {
        let form = EntryForm {
            day: "2018-10-06".into(),
            start: "8 o'clock".into(),
            end: Some("17:05".into()),
            end_day_offset: 0,
            breaks: 0,
            notes: Notes::default(),
        };

        let err = form.into_entry(EntryId::draft(), UtcOffset::UTC).unwrap_err();
        assert!(matches!(err, EntryError::InvalidField { field: "start", .. }));
    }

    #[test]
    fn form_validates_the_result() {
        let form = EntryForm {
            day: "2018-10-06".into(),
            start: "17:00".into(),
            end: Some("09:00".into()),
            end_day_offset: 0,
            breaks: 0,
            notes: Notes::default(),
        };

        assert_eq!(
            form.into_entry(EntryId::draft(), UtcOffset::UTC),
            Err(EntryError::EndsBeforeStart)
        );
    }

    #[test]
    fn blank_form_is_valid() {
        let form = EntryForm::blank(datetime!(2024-03-01 20:30 UTC));
        assert_eq!(form.start, "20:30");
        assert_eq!(form.end.as_deref(), Some("23:59"));
        assert!(form.into_entry(EntryId::draft(), UtcOffset::UTC).is_ok());
    }

    #[test]
    fn form_round_trips_a_stored_entry() {
        let entry = workday().id(EntryId::from("1"));
        let form = EntryForm::from_entry(&entry, UtcOffset::UTC);
        assert_eq!(form.day, "2018-10-06");
        assert_eq!(form.breaks, 30);
        assert_eq!(form.into_entry(EntryId::from("1"), UtcOffset::UTC), Ok(entry));
    }

    #[test]
    fn form_keeps_an_entry_past_midnight() {
        let entry = Entry::new(
            datetime!(2018-10-06 22:00 UTC),
            Some(datetime!(2018-10-07 02:00 UTC)),
            Duration::ZERO,
        )
        .id(EntryId::from("2"));

        let form = EntryForm::from_entry(&entry, UtcOffset::UTC);
        assert_eq!(form.end_day_offset, 1);
        assert_eq!(
            form.clone().into_entry(EntryId::from("2"), UtcOffset::UTC),
            Ok(entry)
        );

        let moved = EntryForm {
            day: "2018-10-08".into(),
            ..form
        }
        .into_entry(EntryId::from("2"), UtcOffset::UTC)
        .unwrap();
        assert_eq!(moved.end, Some(datetime!(2018-10-09 02:00 UTC)));
        assert_eq!(moved.worked(), Duration::hours(4));
    }

    #[test]
    fn form_keeps_an_open_entry_open() {
        let entry = Entry::new(datetime!(2018-10-06 08:00 UTC), None, Duration::ZERO)
            .id(EntryId::from("3"));

        let mut form = EntryForm::from_entry(&entry, UtcOffset::UTC);
        assert_eq!(form.end, None);

        form.notes = Notes::Description("Still going".into());
        let edited = form.into_entry(EntryId::from("3"), UtcOffset::UTC).unwrap();
        assert!(edited.is_open());
        assert_eq!(edited.start, entry.start);
    }

    #[test]
    fn numeric_ids_go_back_as_numbers() {
        let fetched = EntryId::from(WireId::Number(7));
        assert_eq!(fetched, EntryId::from("7"));
        assert_eq!(fetched.to_wire(), Some(WireId::Number(7)));

        let typed = EntryId::from("5bb8c3");
        assert_eq!(typed.to_wire(), Some(WireId::Text("5bb8c3".into())));
        assert_eq!(EntryId::draft().to_wire(), None);

        let payload = workday().id(fetched).to_payload();
        assert_eq!(payload.id, Some(WireId::Number(7)));
    }
}
