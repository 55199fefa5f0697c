use eyre::{bail, Result};
use time::OffsetDateTime;
use timesheet_client::actions;
use timesheet_client::api_client::ApiClient;
use timesheet_client::domain::{Entry, EntryId, Period, User};
use timesheet_client::session::Session;
use timesheet_client::settings::Settings;
use timesheet_client::store::{Action, Store};

/// Everything a command needs: settings, an API client carrying the stored
/// session, and the store.
#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    pub client: ApiClient,
    pub store: Store,
    pub session: Option<Session>,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        let session = settings.session()?;
        let mut client = ApiClient::new(&settings.server_address, &settings.api_root)?;
        let mut store = Store::default();

        if let Some(session) = &session {
            client = client.with_session(session);
            store.dispatch(Action::LoginComplete {
                user: User::named(&session.username, None),
            });
        }

        Ok(Self {
            settings,
            client,
            store,
            session,
        })
    }

    pub fn require_login(&self) -> Result<()> {
        if self.session.is_none() {
            bail!("You are not logged in. Run `timesheet login` first.");
        }
        Ok(())
    }

    pub async fn load_entries(&mut self, period: Period) -> Result<usize> {
        let range = period.range(OffsetDateTime::now_utc());
        let count = actions::fetch_entries(&mut self.store, &self.client, range).await?;
        Ok(count)
    }

    /// Fetch everything and look up one entry.
    pub async fn find_entry(&mut self, id: &str) -> Result<Entry> {
        self.load_entries(Period::AllTime).await?;
        match self.store.state().entry(&EntryId::from(id)) {
            Some(entry) => Ok(entry.clone()),
            None => bail!("Invalid timesheet entry id, {id}"),
        }
    }
}
