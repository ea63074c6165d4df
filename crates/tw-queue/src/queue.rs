//! `TurnQueue` — the discrete-event turn scheduler.
//!
//! # Why this exists
//!
//! In a turn-based world every actor finishes its action at its own pace: a
//! quick stab costs 1 tick, digging a tunnel costs 40.  Scanning all N actors
//! every tick to find whoever is due would cost O(N) per tick regardless of
//! how many actors are actually due.  `TurnQueue` inverts the problem: actors
//! are bucketed by the tick at which they next act, so selecting the next
//! actor touches only the earliest bucket.
//!
//! # Structure
//!
//! Three cooperating maps, kept consistent by every public operation:
//!
//! - `actors` — the ownership store.  While an actor is scheduled the queue
//!   is the sole owner of its payload; callers hold only `ActorId`s and get
//!   the payload back solely through [`TurnQueue::remove`].
//! - `slots` — the time index: `BTreeMap<Tick, VecDeque<ActorId>>`, iterated
//!   ascending.  Buckets are created lazily and dropped when emptied, so the
//!   first entry is always the minimal occupied tick.
//! - `times` — the reverse map actor → tick, so removal and rescheduling
//!   reach the right bucket in O(log W) without scanning the index.
//!
//! # Fairness
//!
//! Actors sharing a tick live in one `VecDeque` in arrival order.
//! [`TurnQueue::next_actor`] rotates the head of the earliest bucket to its
//! tail, so repeated calls without an intervening [`TurnQueue::advance`]
//! cycle through every tied actor once before any repeats.  The rotation
//! cursor *is* the deque order, which makes it part of the snapshot — a
//! save/reload replays the exact same tie-break sequence.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) bucket lookup where W = number of distinct
//! occupied ticks.  In-bucket removal is linear in bucket size, which is fine
//! because same-tick populations are small; an actor → position index could
//! be added if profiling ever says otherwise.

use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashMap;
use tw_core::{ActorId, Tick, TimeInterval};

use crate::{QueueError, QueueResult};

// ── TurnActor ─────────────────────────────────────────────────────────────────

/// The seam between the scheduler and the world's actor type.
///
/// The queue reads nothing from the payload except its identity.  The ID
/// must be stable for the actor's whole life and unique among all actors
/// ever handed to one queue.
pub trait TurnActor {
    fn actor_id(&self) -> ActorId;
}

// ── TurnQueue ─────────────────────────────────────────────────────────────────

/// Ordered scheduler mapping future ticks → actors due to act at that tick.
pub struct TurnQueue<A> {
    /// Ownership store: payload of every currently scheduled actor.
    actors: FxHashMap<ActorId, A>,
    /// Time index: tick → bucket of actor IDs in fairness-rotation order.
    slots: BTreeMap<Tick, VecDeque<ActorId>>,
    /// Reverse map: actor → the tick of the bucket currently holding it.
    times: FxHashMap<ActorId, Tick>,
}

impl<A> Default for TurnQueue<A> {
    fn default() -> Self {
        Self {
            actors: FxHashMap::default(),
            slots: BTreeMap::new(),
            times: FxHashMap::default(),
        }
    }
}

impl<A: TurnActor> TurnQueue<A> {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Take ownership of `actor` and schedule it to act at `time`, at the
    /// back of the line behind anything already waiting on that tick.
    ///
    /// Precondition: the actor is not already scheduled.  Adding a live ID
    /// twice is a caller bug, checked in debug builds only.
    pub fn add(&mut self, actor: A, time: Tick) {
        let id = actor.actor_id();
        debug_assert!(
            !self.times.contains_key(&id),
            "actor {id} is already scheduled"
        );
        self.slots.entry(time).or_default().push_back(id);
        self.times.insert(id, time);
        self.actors.insert(id, actor);
    }

    /// Unschedule `id` and hand its payload back to the caller.
    ///
    /// Used when an actor dies, transforms into a different entity, or is
    /// picked up by another subsystem.  After this returns, every query for
    /// `id` fails with [`QueueError::UnknownActor`] until it is re-added.
    pub fn remove(&mut self, id: ActorId) -> QueueResult<A> {
        let time = self.times.remove(&id).ok_or(QueueError::UnknownActor(id))?;
        self.erase_from_bucket(time, id);
        // The three maps are updated together in every operation, so a
        // reverse-map entry implies an owned payload.
        self.actors
            .remove(&id)
            .ok_or(QueueError::UnknownActor(id))
    }

    /// The tick at which `id` is scheduled to act.
    pub fn time_of(&self, id: ActorId) -> QueueResult<Tick> {
        self.times
            .get(&id)
            .copied()
            .ok_or(QueueError::UnknownActor(id))
    }

    /// Reschedule `id` to `by` ticks after its current slot, at the back of
    /// the destination bucket.  Returns the new tick.
    ///
    /// This is the sole rescheduling primitive: every action an actor
    /// completes must be followed by exactly one `advance` whose interval is
    /// that action's cost.  A zero interval is rejected — an actor that never
    /// moves forward in time would monopolise [`Self::next_actor`].
    pub fn advance(&mut self, id: ActorId, by: TimeInterval) -> QueueResult<Tick> {
        if by.is_zero() {
            return Err(QueueError::NonPositiveInterval);
        }
        let current = self.time_of(id)?;
        let next = current + by;
        self.erase_from_bucket(current, id);
        self.slots.entry(next).or_default().push_back(id);
        self.times.insert(id, next);
        Ok(next)
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// The actor that should act next, without unscheduling it.
    ///
    /// Selects the head of the minimal-tick bucket and rotates it to that
    /// bucket's tail, so actors tied on the same tick each get one turn
    /// before any of them gets a second.  `None` means the queue is empty —
    /// a normal "nothing to do" outcome, not an error.
    pub fn next_actor(&mut self) -> Option<&A> {
        let (_, bucket) = self.slots.iter_mut().next()?;
        let id = bucket.pop_front()?;
        bucket.push_back(id);
        self.actors.get(&id)
    }

    /// The earliest tick with at least one scheduled actor, or `None` if
    /// the queue is empty.  Does not rotate.
    pub fn next_tick(&self) -> Option<Tick> {
        self.slots.keys().next().copied()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every scheduled actor, ascending by tick and within a tick in
    /// rotation order.
    ///
    /// The order is deterministic but is *not* turn order — use
    /// [`Self::next_actor`] for that.  Intended for bulk operations:
    /// full-population iteration, persistence, broadcast.
    pub fn all_actors(&self) -> impl Iterator<Item = &A> {
        self.slots
            .values()
            .flat_map(|bucket| bucket.iter().map(|id| &self.actors[id]))
    }

    /// Shared access to a scheduled actor's payload.  `None` if unscheduled.
    pub fn get(&self, id: ActorId) -> Option<&A> {
        self.actors.get(&id)
    }

    /// Exclusive access to a scheduled actor's payload, e.g. for the action
    /// that follows [`Self::next_actor`].  Scheduling state (the actor's
    /// tick and bucket position) is only ever changed through the queue API.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut A> {
        self.actors.get_mut(&id)
    }

    /// `true` if `id` is currently scheduled.
    pub fn contains(&self, id: ActorId) -> bool {
        self.times.contains_key(&id)
    }

    /// Number of scheduled actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Number of distinct occupied ticks.
    pub fn bucket_count(&self) -> usize {
        self.slots.len()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Remove `id` from the bucket at `time`, dropping the bucket if it
    /// empties.  Scans that one bucket only.
    fn erase_from_bucket(&mut self, time: Tick, id: ActorId) {
        if let Some(bucket) = self.slots.get_mut(&time) {
            if let Some(pos) = bucket.iter().position(|&a| a == id) {
                bucket.remove(pos);
            }
            if bucket.is_empty() {
                self.slots.remove(&time);
            }
        }
    }

    // ── Snapshot plumbing (used by the `snapshot` module) ─────────────────

    pub(crate) fn buckets(&self) -> impl Iterator<Item = (Tick, &VecDeque<ActorId>)> {
        self.slots.iter().map(|(&t, b)| (t, b))
    }

    pub(crate) fn payload(&self, id: ActorId) -> &A {
        &self.actors[&id]
    }
}
