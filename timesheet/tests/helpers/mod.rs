#![allow(dead_code)]

use eyre::Result;
use serde_json::{json, Value};
use timesheet_client::api_client::ApiClient;
use timesheet_client::session::Session;
use timesheet_client::settings::Settings;
use timesheet_client::store::Store;
use wiremock::MockServer;

pub const TOKEN: &str = "asd123";

pub struct TestClient {
    pub settings: Settings,
    pub client: ApiClient,
    pub store: Store,
    _dir: tempfile::TempDir,
}

impl TestClient {
    pub fn build(address: &str) -> Result<Self> {
        let dir = tempfile::TempDir::new()?;
        let session_path = dir.path().join("session");

        let builder = Settings::builder()?
            .set_override("server_address", address)?
            .set_override("session_path", session_path.to_str())?;
        let settings = Settings::finish(builder)?;
        let client = ApiClient::new(&settings.server_address, &settings.api_root)?;

        Ok(Self {
            settings,
            client,
            store: Store::default(),
            _dir: dir,
        })
    }

    /// A client that already holds a token, as after `login`.
    pub fn logged_in(address: &str) -> Result<Self> {
        let mut app = Self::build(address)?;
        let session = Session {
            token: Some(TOKEN.into()),
            username: "admin".into(),
        };
        app.client = app.client.with_session(&session);
        Ok(app)
    }
}

pub async fn spawn_server() -> MockServer {
    MockServer::start().await
}

pub fn entry_json(id: i64, start: &str, end: &str, breaks: i64) -> Value {
    json!({
        "id": id,
        "start": start,
        "end": end,
        "breaks": breaks,
        "morning": "Drank **loads** of coffee",
        "afternoon": "Wrote Code",
    })
}
