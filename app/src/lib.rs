// gridpad application layer: store, assistant, notifications

pub mod assistant;
pub mod error;
pub mod notify;
pub mod store;

pub use assistant::{Assistant, Conversation, KeywordAssistant};
pub use error::{AssistantError, StoreError};
pub use notify::{Notification, Severity};
pub use store::{Command, CommandOutcome, ImportJob, ImportTicket, ReplyJob, ReplyTicket, Store};
