use crate::app::App;
use crate::view;
use clap::{Args, Parser};
use eyre::Result;
use time::OffsetDateTime;
use timesheet_client::actions;
use timesheet_client::domain::{EntryForm, EntryId, Notes};
use timesheet_client::settings::Settings;

/// Form fields. Anything left out keeps its current value.
#[derive(Args, Debug, Default)]
pub struct EntryArgs {
    /// YYYY-MM-DD
    #[arg(long)]
    day: Option<String>,
    /// HH:MM
    #[arg(long)]
    start: Option<String>,
    /// HH:MM
    #[arg(long)]
    end: Option<String>,
    /// Minutes
    #[arg(long)]
    breaks: Option<i64>,
    #[arg(long, conflicts_with = "description")]
    morning: Option<String>,
    #[arg(long, conflicts_with = "description")]
    afternoon: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl EntryArgs {
    fn apply(self, mut form: EntryForm) -> EntryForm {
        if let Some(day) = self.day {
            form.day = day;
        }
        if let Some(start) = self.start {
            form.start = start;
        }
        if let Some(end) = self.end {
            form.end = Some(end);
        }
        if let Some(breaks) = self.breaks {
            form.breaks = breaks;
        }

        if let Some(description) = self.description {
            form.notes = Notes::Description(description);
        } else if self.morning.is_some() || self.afternoon.is_some() {
            let (morning, afternoon) = match form.notes {
                Notes::Halves { morning, afternoon } => (morning, afternoon),
                Notes::Description(_) => (String::new(), String::new()),
            };
            form.notes = Notes::Halves {
                morning: self.morning.unwrap_or(morning),
                afternoon: self.afternoon.unwrap_or(afternoon),
            };
        }
        form
    }
}

#[derive(Parser, Debug)]
pub struct NewCmd {
    #[command(flatten)]
    fields: EntryArgs,
}

impl NewCmd {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let mut app = App::new(settings)?;
        app.require_login()?;

        let offset = view::local_offset();
        let now = OffsetDateTime::now_utc().to_offset(offset);
        let form = self.fields.apply(EntryForm::blank(now));
        let entry = form.into_entry(EntryId::draft(), offset)?;

        let saved = actions::save_entry(&mut app.store, &app.client, entry).await?;
        println!("Saved entry {}", saved.id);
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct EditCmd {
    id: String,
    #[command(flatten)]
    fields: EntryArgs,
}

impl EditCmd {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let mut app = App::new(settings)?;
        app.require_login()?;

        let offset = view::local_offset();
        let current = app.find_entry(&self.id).await?;
        let form = self.fields.apply(EntryForm::from_entry(&current, offset));
        let entry = form.into_entry(current.id.clone(), offset)?;

        let saved = actions::save_entry(&mut app.store, &app.client, entry).await?;
        print!("{}", view::entry_detail(&saved, offset));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EntryForm {
        EntryForm {
            day: "2018-10-06".into(),
            start: "08:00".into(),
            end: Some("16:00".into()),
            end_day_offset: 0,
            breaks: 0,
            notes: Notes::Halves {
                morning: "Standup".into(),
                afternoon: "Review".into(),
            },
        }
    }

    #[test]
    fn untouched_fields_are_kept() {
        let args = EntryArgs {
            end: Some("17:30".into()),
            afternoon: Some("Deploy".into()),
            ..Default::default()
        };
        let form = args.apply(form());

        assert_eq!(form.start, "08:00");
        assert_eq!(form.end.as_deref(), Some("17:30"));
        assert_eq!(
            form.notes,
            Notes::Halves {
                morning: "Standup".into(),
                afternoon: "Deploy".into(),
            }
        );
    }

    #[test]
    fn description_replaces_halves() {
        let args = EntryArgs {
            description: Some("Wrote Code".into()),
            breaks: Some(45),
            ..Default::default()
        };
        let form = args.apply(form());

        assert_eq!(form.breaks, 45);
        assert_eq!(form.notes, Notes::Description("Wrote Code".into()));
    }

    #[test]
    fn open_entry_stays_open_without_an_end() {
        let open = EntryForm {
            end: None,
            ..form()
        };
        let args = EntryArgs {
            description: Some("Still going".into()),
            ..Default::default()
        };
        assert_eq!(args.apply(open.clone()).end, None);

        let args = EntryArgs {
            end: Some("18:00".into()),
            ..Default::default()
        };
        assert_eq!(args.apply(open).end.as_deref(), Some("18:00"));
    }
}
