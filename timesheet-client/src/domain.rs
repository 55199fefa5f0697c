pub mod entry;
pub mod period;
pub mod summary;
pub mod user;

pub use entry::{Entry, EntryForm, EntryId, Notes};
pub use period::{DateRange, Period};
pub use summary::{RemoteSummary, Summary};
pub use user::{AccessLevel, User};
