use crate::domain::{DateRange, Entry, EntryId, RemoteSummary};
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use timesheet_common::api::{
    EntriesResponse, EntryResponse, LoginRequest, LoginResponse, PingResponse, RangeRequest,
    StatusResponse, SummaryResponse,
};
use tracing::debug;

/// Read a JSON body. An error status never reads as success: it becomes the
/// body's `error` message when there is one, the bare status otherwise.
async fn read_json<T: DeserializeOwned>(res: Response) -> ApiResult<T> {
    let status = res.status();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return Err(ApiError::Status(status));
    }

    let body = res.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|x| x.get("error")?.as_str().map(str::to_string));
        return Err(match message {
            Some(message) => ApiError::Server(message),
            None => ApiError::Status(status),
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    site: String,
    api_root: String,
    token: Option<String>,
}

impl ApiClient {
    /// `server_address` is the site root, `api_root` the prefix of every API call.
    pub fn new(server_address: &str, api_root: &str) -> ApiResult<Self> {
        let client = Client::builder().build()?;
        let site = server_address.trim_end_matches('/').to_string();
        let api_root = format!("/{}", api_root.trim_matches('/'));
        let api_root = if api_root == "/" { String::new() } else { api_root };

        Ok(Self {
            client,
            site,
            api_root,
            token: None,
        })
    }

    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = session.token.clone();
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.site, self.api_root, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, %url, "api request");
        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Log in and keep the returned token for the following calls.
    pub async fn login(&mut self, username: &str, password: &str) -> ApiResult<Session> {
        let res = self
            .request(Method::POST, "/login")
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let res: LoginResponse = read_json(res).await?;

        if let Some(error) = res.error {
            return Err(ApiError::Server(error));
        }

        let Some(token) = res.token else {
            return Err(ApiError::Malformed("login response has no token".into()));
        };

        self.token = Some(token.clone());
        Ok(Session {
            token: Some(token),
            username: res.username.unwrap_or_else(|| username.to_string()),
        })
    }

    pub async fn logout(&mut self) -> ApiResult<()> {
        let res = self.request(Method::POST, "/logout").send().await?;
        let res: StatusResponse = read_json(res).await?;

        if let Some(error) = res.error {
            return Err(ApiError::Server(error));
        }

        self.token = None;
        Ok(())
    }

    /// Ask the server who the current session belongs to.
    pub async fn ping(&self) -> ApiResult<PingResponse> {
        if self.token.is_none() {
            return Err(ApiError::Unauthenticated);
        }

        let res = self.request(Method::GET, "/ping").send().await?;
        read_json(res).await
    }

    pub async fn summary(&self) -> ApiResult<RemoteSummary> {
        let res = self
            .request(Method::GET, "/timesheets/summary")
            .send()
            .await?;
        let res: SummaryResponse = read_json(res).await?;

        if let Some(error) = res.get("error").and_then(|x| x.as_str()) {
            return Err(ApiError::Server(error.to_string()));
        }

        Ok(RemoteSummary::from(res))
    }

    /// Create the entry when it is still a draft, update it otherwise. Returns
    /// the copy the server stored.
    pub async fn save_entry(&self, entry: &Entry) -> ApiResult<Entry> {
        entry.validate()?;

        let path = if entry.id.is_draft() {
            "/timesheets/new".to_string()
        } else {
            format!("/timesheets/{}", entry.id)
        };
        let res = self
            .request(Method::POST, &path)
            .json(&entry.to_payload())
            .send()
            .await?;
        let res: EntryResponse = read_json(res).await?;

        match (res.success, res.entry) {
            (true, Some(saved)) => Entry::from_payload(saved),
            (true, None) => Err(ApiError::Malformed("saved entry missing".into())),
            (false, _) => Err(ApiError::unsuccessful(res.error)),
        }
    }

    pub async fn delete_entry(&self, id: &EntryId) -> ApiResult<()> {
        let res = self
            .request(Method::DELETE, &format!("/timesheets/{id}"))
            .send()
            .await?;
        let res: StatusResponse = read_json(res).await?;

        if !res.success {
            return Err(ApiError::unsuccessful(res.error));
        }

        Ok(())
    }

    pub async fn fetch_entries(&self, range: DateRange) -> ApiResult<Vec<Entry>> {
        let res = self
            .request(Method::POST, "/timesheets")
            .json(&RangeRequest {
                start: range.start,
                end: range.end,
            })
            .send()
            .await?;
        let res: EntriesResponse = read_json(res).await?;

        if !res.success {
            return Err(ApiError::unsuccessful(res.error));
        }

        res.entries.into_iter().map(Entry::from_payload).collect()
    }

    /// Download a static document served next to the API, e.g. the resume PDF.
    pub async fn download(&self, path: &str) -> ApiResult<Vec<u8>> {
        let url = format!("{}/{}", self.site, path.trim_start_matches('/'));
        debug!(%url, "download");
        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(res.bytes().await?.to_vec())
    }
}
