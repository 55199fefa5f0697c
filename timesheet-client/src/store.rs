//! Single state container for the front-end.
//!
//! Views never touch [`State`] directly. They dispatch an [`Action`] and
//! [`reduce`] computes the next state.

use crate::domain::{Entry, EntryId, User};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub user: User,
    /// Sorted by start time, oldest first.
    pub entries: Vec<Entry>,
    /// Entries replaced by an optimistic edit that the server has not
    /// confirmed yet. `None` when the edit created a new entry.
    pub pending: HashMap<EntryId, Option<Entry>>,
}

impl State {
    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|x| &x.id == id)
    }

    pub fn is_pending(&self, id: &EntryId) -> bool {
        self.pending.contains_key(id)
    }

    fn upsert(&mut self, entry: Entry) {
        match self.entries.iter().position(|x| x.id == entry.id) {
            Some(ix) => self.entries[ix] = entry,
            None => self.entries.push(entry),
        }
        self.sort();
    }

    fn remove(&mut self, id: &EntryId) {
        self.entries.retain(|x| &x.id != id);
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.start.cmp(&b.start));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoginComplete { user: User },
    Logout,
    Ping { user: User },
    EntryDraft { entry: Entry },
    EntrySaved { draft: EntryId, entry: Entry },
    EntryRejected { draft: EntryId },
    EntryDelete { id: EntryId },
    EntriesUpdated { entries: Vec<Entry> },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoginComplete { .. } => "LOGIN_COMPLETE",
            Action::Logout => "LOGOUT",
            Action::Ping { .. } => "PING",
            Action::EntryDraft { .. } => "ENTRY_DRAFT",
            Action::EntrySaved { .. } => "ENTRY_SAVED",
            Action::EntryRejected { .. } => "ENTRY_REJECTED",
            Action::EntryDelete { .. } => "ENTRY_DELETE",
            Action::EntriesUpdated { .. } => "ENTRIES_UPDATED",
        }
    }
}

pub fn reduce(state: &State, action: Action) -> State {
    let mut next = state.clone();

    match action {
        Action::LoginComplete { user } | Action::Ping { user } => {
            next.user = user;
        }
        Action::Logout => {
            next = State::default();
        }
        Action::EntryDraft { entry } => {
            // Keep the oldest confirmed value if the same entry is edited twice.
            if !next.pending.contains_key(&entry.id) {
                let previous = next.entry(&entry.id).cloned();
                next.pending.insert(entry.id.clone(), previous);
            }
            next.upsert(entry);
        }
        Action::EntrySaved { draft, entry } => {
            next.pending.remove(&draft);
            if draft != entry.id {
                next.remove(&draft);
            }
            next.upsert(entry);
        }
        Action::EntryRejected { draft } => {
            if let Some(previous) = next.pending.remove(&draft) {
                match previous {
                    Some(entry) => next.upsert(entry),
                    None => next.remove(&draft),
                }
            }
        }
        Action::EntryDelete { id } => {
            next.pending.remove(&id);
            next.remove(&id);
        }
        Action::EntriesUpdated { entries } => {
            let mut by_id: BTreeMap<EntryId, Entry> = next
                .entries
                .drain(..)
                .map(|x| (x.id.clone(), x))
                .collect();
            for entry in entries {
                by_id.insert(entry.id.clone(), entry);
            }
            next.entries = by_id.into_values().collect();
            next.sort();
        }
    }

    next
}

type Listener = Box<dyn FnMut(&State) + Send>;

#[derive(Default)]
pub struct Store {
    state: State,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Store {
    pub fn new(state: State) -> Self {
        Self {
            state,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "dispatch");
        self.state = reduce(&self.state, action);
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    /// Call `listener` with the new state after every dispatch.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&State) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }
}
