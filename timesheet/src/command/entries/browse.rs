use crate::app::App;
use crate::view;
use clap::Parser;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use eyre::{Context, Result};
use futures_util::stream::StreamExt;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::prelude::{Buffer, Widget};
use ratatui::style::palette::tailwind::{GRAY, RED, SLATE, YELLOW};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Tabs};
use ratatui::{DefaultTerminal, Frame};
use time::{OffsetDateTime, UtcOffset};
use timesheet_client::actions;
use timesheet_client::domain::summary::round_tenths;
use timesheet_client::domain::{Entry, EntryId, Period, Summary};
use timesheet_client::settings::Settings;
use tokio::time::{sleep, Duration};

#[derive(Parser, Debug)]
pub struct Cmd {
    #[arg(short, long, default_value = "all")]
    period: Period,
}

impl Cmd {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let app = App::new(settings)?;
        app.require_login()?;

        let mut browser = Browser::new(app, self.period);
        browser.queue.push(Query::Entries);
        browser.run_queries().await;

        let mut terminal = ratatui::init();
        let result = browser.event_loop(&mut terminal).await;
        ratatui::restore();

        result
    }
}

#[derive(Default, Debug)]
struct InputCursor {
    source: String,
}

impl InputCursor {
    fn insert(&mut self, c: char) {
        self.source.push(c);
    }

    fn remove(&mut self) {
        self.source.pop();
    }

    fn as_str(&self) -> &str {
        self.source.as_str()
    }
}

#[derive(Debug)]
enum Prompt {
    Default,
    Info(String),
    Error(String),
    Confirm(InputCursor),
}

impl Prompt {
    fn value(&self) -> String {
        match self {
            Prompt::Default => "Tab to change the period".into(),
            Prompt::Info(value) | Prompt::Error(value) => value.clone(),
            Prompt::Confirm(input) => format!("Delete this entry? (y/n)  {}", input.as_str()),
        }
    }

    fn style(&self) -> Style {
        match self {
            Prompt::Default => Style::new().fg(GRAY.c500),
            Prompt::Info(_) | Prompt::Confirm(_) => Style::default(),
            Prompt::Error(_) => Style::new().fg(RED.c500),
        }
    }
}

struct PromptWidget {
    value: String,
    style: Style,
}

impl Widget for PromptWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::new(
            Direction::Horizontal,
            [Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)],
        );
        let [left_l, right_l] = layout.areas(area);

        let key = Style::new().bg(SLATE.c800).fg(GRAY.c400);
        let help = Line::from(vec![
            Span::raw("   Open "),
            Span::styled(" ⏎ ", key),
            Span::raw("   Delete "),
            Span::styled(" d ", key),
            Span::raw("   Refresh "),
            Span::styled(" r ", key),
            Span::raw("   Exit "),
            Span::styled(" q ", key),
        ])
        .style(Style::new().fg(GRAY.c200))
        .alignment(Alignment::Right);

        Paragraph::new(Line::raw(self.value).style(self.style)).render(left_l, buf);
        Paragraph::new(help).render(right_l, buf);
    }
}

#[derive(Debug, PartialEq)]
enum Route {
    List,
    Detail,
}

#[derive(Debug, PartialEq)]
enum Query {
    Entries,
    Delete(EntryId),
}

#[derive(Debug)]
struct Browser {
    app: App,
    period: Period,
    selected: usize,
    route: Route,
    prompt: Prompt,
    queue: Vec<Query>,
    running: bool,
    offset: UtcOffset,
}

impl Browser {
    fn new(app: App, period: Period) -> Self {
        Self {
            app,
            period,
            selected: 0,
            route: Route::List,
            prompt: Prompt::Default,
            queue: Vec::new(),
            running: true,
            offset: view::local_offset(),
        }
    }

    /// Entries of the current period, newest first.
    fn visible(&self) -> Vec<&Entry> {
        let mut entries = self
            .period
            .filter(&self.app.store.state().entries, OffsetDateTime::now_utc());
        entries.reverse();
        entries
    }

    fn selected_entry(&self) -> Option<&Entry> {
        self.visible().get(self.selected).copied()
    }

    fn move_down(&mut self) {
        self.selected = (self.selected + 1).min(self.visible().len().saturating_sub(1));
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.visible().len().saturating_sub(1));
    }

    fn quit(&mut self) {
        self.running = false;
    }

    fn ask_delete(&mut self) {
        self.prompt = match self.selected_entry() {
            Some(_) => Prompt::Confirm(InputCursor::default()),
            None => Prompt::Info("Nothing selected".into()),
        };
    }

    fn confirm_delete(&mut self, answer: &str) {
        let id = self.selected_entry().map(|x| x.id.clone());
        self.prompt = match (answer, id) {
            ("y", Some(id)) => {
                self.queue.push(Query::Delete(id));
                Prompt::Info("Deleting...".into())
            }
            ("y", None) | ("n", _) => Prompt::Default,
            _ => Prompt::Info("Only 'y' or 'n' are allowed!".into()),
        };
    }

    fn cycle_period(&mut self) {
        self.period = self.period.next();
        self.selected = 0;
        self.queue.push(Query::Entries);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if let Prompt::Confirm(input) = &mut self.prompt {
            match key.code {
                KeyCode::Char(c) => input.insert(c),
                KeyCode::Backspace => input.remove(),
                KeyCode::Enter => {
                    let answer = input.as_str().trim().to_lowercase();
                    self.confirm_delete(&answer);
                }
                KeyCode::Esc => self.prompt = Prompt::Default,
                _ => {}
            }
            return;
        }

        match self.route {
            Route::List => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                KeyCode::Char('j') | KeyCode::Down => self.move_down(),
                KeyCode::Char('k') | KeyCode::Up => self.move_up(),
                KeyCode::Tab | KeyCode::Char('p') => self.cycle_period(),
                KeyCode::Char('r') => self.queue.push(Query::Entries),
                KeyCode::Char('d') => self.ask_delete(),
                KeyCode::Enter | KeyCode::Char('l') => {
                    if self.selected_entry().is_some() {
                        self.route = Route::Detail;
                    }
                }
                _ => {}
            },
            Route::Detail => match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h') => {
                    self.route = Route::List
                }
                KeyCode::Char('d') => self.ask_delete(),
                _ => {}
            },
        }
    }

    async fn run_queries(&mut self) {
        while let Some(query) = self.queue.pop() {
            match query {
                Query::Entries => match self.app.load_entries(self.period).await {
                    Ok(count) => {
                        self.clamp_selection();
                        self.prompt = Prompt::Info(format!("Loaded {count} entries"));
                    }
                    Err(e) => {
                        self.prompt = Prompt::Error(format!("Failed to load entries: {e}"));
                    }
                },
                Query::Delete(id) => {
                    match actions::delete_entry(&mut self.app.store, &self.app.client, &id).await {
                        Ok(()) => {
                            self.route = Route::List;
                            self.clamp_selection();
                            self.prompt = Prompt::Info("Entry deleted".into());
                        }
                        Err(e) => {
                            self.prompt = Prompt::Error(format!("Failed to delete entry: {e}"));
                        }
                    }
                }
            }
        }
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();

        while self.running {
            terminal
                .draw(|frame| self.render(frame))
                .wrap_err("failed to render terminal")?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)
                    }
                    Some(Err(e)) => return Err(e).wrap_err("failed to read terminal events"),
                    None => self.quit(),
                    _ => {}
                },
                _ = sleep(Duration::from_millis(250)) => {}
            }

            self.run_queries().await;
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ],
        );
        let [tabs_l, spacer_l, main_l, summary_l, prompt_l] = layout.areas(frame.area());
        let visible = self.visible();

        let selected_tab = Period::ALL
            .iter()
            .position(|x| *x == self.period)
            .unwrap_or(0);
        let tabs = Tabs::new(Period::ALL.iter().map(|x| x.label()))
            .select(selected_tab)
            .style(Style::new().fg(GRAY.c500))
            .highlight_style(Style::new().fg(YELLOW.c500));
        frame.render_widget(tabs, tabs_l);

        frame.render_widget(
            Paragraph::new(Line::raw("-".repeat(spacer_l.width.into())))
                .style(Style::new().fg(GRAY.c500)),
            spacer_l,
        );

        match self.route {
            Route::List => self.render_list(frame, main_l, &visible),
            Route::Detail => self.render_detail(frame, main_l),
        }

        let summary = Summary::from_entries(visible.iter().copied());
        let summary_line = format!(
            "Days {}   Hours {}   Average {}",
            summary.total_days,
            round_tenths(summary.total_hours),
            round_tenths(summary.average_day),
        );
        frame.render_widget(
            Paragraph::new(summary_line).style(Style::new().fg(GRAY.c400)),
            summary_l,
        );

        frame.render_widget(
            PromptWidget {
                value: self.prompt.value(),
                style: self.prompt.style(),
            },
            prompt_l,
        );

        if let Prompt::Confirm(_) = self.prompt {
            let len = self.prompt.value().chars().count() as u16;
            frame.set_cursor_position(Position::new(prompt_l.x + len, prompt_l.y));
        }
    }

    fn render_list(&self, frame: &mut Frame, rect: Rect, visible: &[&Entry]) {
        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new("No entries").style(Style::new().fg(GRAY.c500)),
                rect,
            );
            return;
        }

        let height = rect.height as usize;
        let skip = self.selected.saturating_sub(height.saturating_sub(1));

        for (i, entry) in visible.iter().enumerate().skip(skip).take(height) {
            let mut style = if i == self.selected {
                Style::new().bg(GRAY.c800)
            } else {
                Style::new()
            };
            if self.app.store.state().is_pending(&entry.id) {
                style = style.fg(GRAY.c500);
            }

            let row = view::entry_row(i + 1, entry, self.offset);
            let item_rect = Rect::new(rect.x, rect.y + (i - skip) as u16, rect.width, 1);
            frame.render_widget(Paragraph::new(row).style(style), item_rect);
        }
    }

    fn render_detail(&self, frame: &mut Frame, rect: Rect) {
        let content = match self.selected_entry() {
            Some(entry) => view::entry_detail(entry, self.offset),
            None => "Entry is gone".to_string(),
        };

        frame.render_widget(
            Paragraph::new(content).block(Block::bordered().border_style(GRAY.c500)),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use time::Duration as TimeDuration;
    use timesheet_client::store::Action;

    fn browser(dir: &TempDir) -> Browser {
        let session = dir.path().join("session");
        let builder = Settings::builder()
            .unwrap()
            .set_override("session_path", session.to_str())
            .unwrap();
        let settings = Settings::finish(builder).unwrap();
        Browser::new(App::new(settings).unwrap(), Period::AllTime)
    }

    fn press(browser: &mut Browser, code: KeyCode) {
        browser.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn with_entries(browser: &mut Browser, ids: &[&str]) {
        let now = OffsetDateTime::now_utc();
        let entries = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let start = now - TimeDuration::days(i as i64 + 1);
                Entry::new(start, Some(start + TimeDuration::hours(8)), TimeDuration::ZERO)
                    .id(EntryId::from(*id))
            })
            .collect();
        browser
            .app
            .store
            .dispatch(Action::EntriesUpdated { entries });
    }

    #[test]
    fn newest_entry_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut browser = browser(&dir);
        with_entries(&mut browser, &["1", "2", "3"]);

        assert_eq!(browser.selected_entry().unwrap().id.as_str(), "1");
        press(&mut browser, KeyCode::Char('j'));
        press(&mut browser, KeyCode::Char('j'));
        press(&mut browser, KeyCode::Char('j'));
        assert_eq!(browser.selected_entry().unwrap().id.as_str(), "3");
        press(&mut browser, KeyCode::Up);
        assert_eq!(browser.selected_entry().unwrap().id.as_str(), "2");
    }

    #[test]
    fn tab_cycles_period_and_refetches() {
        let dir = tempfile::tempdir().unwrap();
        let mut browser = browser(&dir);

        press(&mut browser, KeyCode::Tab);
        assert_eq!(browser.period, Period::Week);
        assert_eq!(browser.queue, vec![Query::Entries]);
    }

    #[test]
    fn delete_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut browser = browser(&dir);
        with_entries(&mut browser, &["1", "2"]);

        press(&mut browser, KeyCode::Char('j'));
        press(&mut browser, KeyCode::Char('d'));
        assert!(matches!(browser.prompt, Prompt::Confirm(_)));

        press(&mut browser, KeyCode::Char('x'));
        press(&mut browser, KeyCode::Enter);
        assert!(browser.queue.is_empty());
        assert!(matches!(browser.prompt, Prompt::Info(_)));

        press(&mut browser, KeyCode::Char('d'));
        press(&mut browser, KeyCode::Char('y'));
        press(&mut browser, KeyCode::Enter);
        assert_eq!(browser.queue, vec![Query::Delete(EntryId::from("2"))]);
    }

    #[test]
    fn delete_on_empty_list_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut browser = browser(&dir);

        press(&mut browser, KeyCode::Char('d'));
        assert!(matches!(browser.prompt, Prompt::Info(_)));
    }

    #[test]
    fn enter_opens_detail_and_q_goes_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut browser = browser(&dir);
        press(&mut browser, KeyCode::Enter);
        assert_eq!(browser.route, Route::List);

        with_entries(&mut browser, &["1"]);
        press(&mut browser, KeyCode::Enter);
        assert_eq!(browser.route, Route::Detail);

        press(&mut browser, KeyCode::Char('q'));
        assert_eq!(browser.route, Route::List);
        assert!(browser.running);

        press(&mut browser, KeyCode::Char('q'));
        assert!(!browser.running);
    }

    #[test]
    fn ctrl_c_quits_from_a_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut browser = browser(&dir);
        with_entries(&mut browser, &["1"]);

        press(&mut browser, KeyCode::Char('d'));
        browser.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!browser.running);
    }
}
