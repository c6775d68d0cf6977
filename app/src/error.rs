use thiserror::Error;

use gridpad_engine::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("a reply is still being composed")]
    ReplyPending,
    #[error("message is empty")]
    EmptyMessage,
    /// A reply arrived for a message that is not awaiting one.
    #[error("no reply is pending for message {0}")]
    NoPendingReply(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The result belongs to a store generation that has been disposed.
    #[error("result arrived after the session was disposed")]
    Stale,

    #[error(transparent)]
    Assistant(#[from] AssistantError),
}
