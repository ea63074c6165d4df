use thiserror::Error;

use tw_core::ActorId;

/// Caller-misuse errors.  Neither is recoverable mid-operation: both mean a
/// collaborator broke the scheduling contract, and the usual response at the
/// call site is to propagate or abort.  An empty queue is *not* an error —
/// `TurnQueue::next_actor` returns `None` for that.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The actor is not currently scheduled (never added, or already removed).
    #[error("actor {0} is not scheduled")]
    UnknownActor(ActorId),

    /// `advance` was given a zero interval; per-actor time must strictly
    /// increase or the same actor would be selected forever.
    #[error("zero interval: actor time must strictly increase")]
    NonPositiveInterval,
}

pub type QueueResult<T> = Result<T, QueueError>;
