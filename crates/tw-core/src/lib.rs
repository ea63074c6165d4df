//! `tw-core` — foundational types for the `turnwheel` turn-scheduling workspace.
//!
//! This crate is a dependency of every other `tw-*` crate.  It intentionally
//! has no `tw-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                  |
//! |----------|-------------------------------------------|
//! | [`ids`]  | `ActorId`                                 |
//! | [`time`] | `Tick`, `TimeInterval`                    |
//! | [`rng`]  | `ActorRng` (per-actor), `SimRng` (global) |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |
//!           | Required by `tw-queue` snapshots.                   |

pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::ActorId;
pub use rng::{ActorRng, SimRng};
pub use time::{Tick, TimeInterval};
