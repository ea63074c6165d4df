//! `tw-queue` — the turn scheduler at the heart of the `turnwheel` workspace.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`queue`]    | `TurnQueue`, `TurnActor` trait                         |
//! | [`snapshot`] | `QueueSnapshot`, `BucketSnapshot`, serde for the queue |
//! | [`error`]    | `QueueError`, `QueueResult<T>`                         |
//!
//! # Turn loop (summary)
//!
//! ```text
//! loop {
//!     let Some(actor) = queue.next_actor() else { break };   // peek + rotate
//!     let (id, cost)  = world.act(actor);                    // external
//!     queue.advance(id, cost)?;                              // cost > 0
//! }
//! ```
//!
//! Per actor the state machine is:
//!
//! ```text
//! Unscheduled ──add──▶ Scheduled(t) ──advance──▶ Scheduled(t + cost)
//!                           │
//!                        remove  (payload ownership returned)
//!                           ▼
//!                      Unscheduled
//! ```
//!
//! `next_actor` and `time_of` never change an actor's state; `next_actor`
//! only rotates the fairness cursor of the earliest bucket.

pub mod error;
pub mod queue;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use error::{QueueError, QueueResult};
pub use queue::{TurnActor, TurnQueue};
pub use snapshot::{BucketSnapshot, QueueSnapshot};
