//! Conversation session memory.
//!
//! A `SessionHistory` holds one session's messages in chronological order;
//! the `HistoryStore` maps session ids to shared histories, creating them
//! on first use.

mod history;
mod store;

pub use history::SessionHistory;
pub use store::{HistoryStore, SessionHandle};
