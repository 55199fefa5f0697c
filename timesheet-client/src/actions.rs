//! Network round trips that end in a dispatch.

use crate::api_client::ApiClient;
use crate::domain::{AccessLevel, DateRange, Entry, EntryId, User};
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::store::{Action, Store};
use tracing::{debug, warn};

pub async fn start_login(
    store: &mut Store,
    client: &mut ApiClient,
    username: &str,
    password: &str,
) -> ApiResult<Session> {
    let session = client.login(username, password).await?;
    store.dispatch(Action::LoginComplete {
        user: User::named(&session.username, None),
    });
    Ok(session)
}

/// Failures are logged and leave the state alone. Returns whether the
/// session was closed.
pub async fn start_logout(store: &mut Store, client: &mut ApiClient) -> bool {
    match client.logout().await {
        Ok(()) => {
            store.dispatch(Action::Logout);
            true
        }
        Err(e) => {
            warn!("Unable to logout: {e}");
            false
        }
    }
}

/// Refresh the current user from the server. A session the server refuses
/// becomes anonymous; network trouble and server faults are only logged.
pub async fn ping(store: &mut Store, client: &ApiClient) {
    match client.ping().await {
        Ok(res) if res.error.is_none() => {
            let level = res.level.and_then(AccessLevel::from_level);
            let user = User::named(res.username.as_deref().unwrap_or_default(), level);
            store.dispatch(Action::Ping { user });
        }
        Ok(res) => {
            debug!(error = ?res.error, "session rejected");
            store.dispatch(Action::Ping {
                user: User::anonymous(),
            });
        }
        Err(e @ (ApiError::Unauthenticated | ApiError::Server(_))) => {
            debug!(error = %e, "session rejected");
            store.dispatch(Action::Ping {
                user: User::anonymous(),
            });
        }
        Err(ApiError::Status(status)) if status.is_client_error() => {
            debug!(%status, "session rejected");
            store.dispatch(Action::Ping {
                user: User::anonymous(),
            });
        }
        Err(e) => warn!("Error encountered while sending a ping: {e}"),
    }
}

/// Validate, show the entry optimistically, then swap in the server copy or
/// roll back.
pub async fn save_entry(store: &mut Store, client: &ApiClient, entry: Entry) -> ApiResult<Entry> {
    entry.validate()?;

    let draft = entry.id.clone();
    store.dispatch(Action::EntryDraft {
        entry: entry.clone(),
    });

    match client.save_entry(&entry).await {
        Ok(saved) => {
            store.dispatch(Action::EntrySaved {
                draft,
                entry: saved.clone(),
            });
            Ok(saved)
        }
        Err(e) => {
            store.dispatch(Action::EntryRejected { draft });
            Err(e)
        }
    }
}

pub async fn delete_entry(store: &mut Store, client: &ApiClient, id: &EntryId) -> ApiResult<()> {
    client.delete_entry(id).await?;
    store.dispatch(Action::EntryDelete { id: id.clone() });
    Ok(())
}

/// Returns how many entries the server sent.
pub async fn fetch_entries(
    store: &mut Store,
    client: &ApiClient,
    range: DateRange,
) -> ApiResult<usize> {
    let entries = client.fetch_entries(range).await?;
    let count = entries.len();
    store.dispatch(Action::EntriesUpdated { entries });
    Ok(count)
}
