//! Plain text renderings shared by the one-shot commands and the browser.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};
use timesheet_client::domain::summary::round_tenths;
use timesheet_client::domain::{Entry, Notes, RemoteSummary, Summary, User};

const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
const CLOCK_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period]");

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// "October 6, 2018"
pub fn format_date(value: OffsetDateTime) -> String {
    value.format(DATE_FORMAT).unwrap_or_default()
}

/// "8:05 AM"
pub fn format_clock(value: OffsetDateTime) -> String {
    value.format(CLOCK_FORMAT).unwrap_or_default()
}

/// "8h 30m"
pub fn format_worked(value: Duration) -> String {
    let sign = if value.is_negative() { "-" } else { "" };
    let minutes = value.whole_minutes().abs();
    format!("{sign}{}h {:02}m", minutes / 60, minutes % 60)
}

pub fn user_line(user: &User) -> String {
    if user.is_logged_in() {
        format!("Logged in as {} ({})", user.username, user.level)
    } else {
        "Not logged in".to_string()
    }
}

pub fn entry_row(position: usize, entry: &Entry, offset: UtcOffset) -> String {
    let start = entry.start.to_offset(offset);
    let end = entry
        .end
        .map(|x| format_clock(x.to_offset(offset)))
        .unwrap_or_else(|| "open".to_string());

    format!(
        "{:>3}  {:<8}  {:<20}  {:>8}  {:>8}  {:>8}",
        position,
        entry.id.as_str(),
        format_date(start),
        format_clock(start),
        end,
        format_worked(entry.worked()),
    )
}

pub fn entry_table(entries: &[&Entry], offset: UtcOffset) -> String {
    let mut out = format!(
        "{:>3}  {:<8}  {:<20}  {:>8}  {:>8}  {:>8}\n",
        "#", "Id", "Date", "Start", "End", "Worked"
    );

    if entries.is_empty() {
        out.push_str("No entries\n");
        return out;
    }

    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&entry_row(i + 1, entry, offset));
        out.push('\n');
    }
    out
}

pub fn summary_card(summary: &Summary) -> String {
    format!(
        "Total Days        {}\nTotal Hours       {}\nAverage Work Day  {}\n",
        summary.total_days,
        round_tenths(summary.total_hours),
        round_tenths(summary.average_day),
    )
}

pub fn remote_summary(summary: &RemoteSummary) -> String {
    if summary.is_empty() {
        return "Nothing to summarise\n".to_string();
    }

    summary
        .iter()
        .map(|(key, value)| format!("{key:<12} {value}\n"))
        .collect()
}

pub fn entry_detail(entry: &Entry, offset: UtcOffset) -> String {
    let start = entry.start.to_offset(offset);
    let mut out = format!("Entry {}\n", entry.id);
    out.push_str(&format!("Date     {}\n", format_date(start)));
    out.push_str(&format!("Start    {}\n", format_clock(start)));
    match entry.end {
        Some(end) => out.push_str(&format!("End      {}\n", format_clock(end.to_offset(offset)))),
        None => out.push_str("End      still open\n"),
    }
    out.push_str(&format!("Breaks   {}\n", format_worked(entry.breaks)));
    out.push_str(&format!("Worked   {}\n", format_worked(entry.worked())));

    match &entry.notes {
        Notes::Halves { morning, afternoon } => {
            out.push_str(&format!("\nMorning\n{morning}\n"));
            out.push_str(&format!("\nAfternoon\n{afternoon}\n"));
        }
        Notes::Description(description) => {
            out.push_str(&format!("\n{description}\n"));
        }
    }
    out
}
