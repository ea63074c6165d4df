//! Durable queue snapshots.
//!
//! A snapshot is the ordered list of buckets — `(tick, payloads in bucket
//! order)` ascending by tick.  Bucket order matters: it carries the fairness
//! rotation cursor, so restoring only `(actor, tick)` pairs without it would
//! silently change future tie-break sequencing.  `TurnQueue` serializes as
//! exactly this shape, and deserializing rebuilds the ownership store, time
//! index, and reverse map from it.

use std::collections::VecDeque;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tw_core::{ActorId, Tick};

use crate::{TurnActor, TurnQueue};

// ── Snapshot types ────────────────────────────────────────────────────────────

/// One bucket: every payload scheduled at `time`, in rotation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSnapshot<A> {
    pub time: Tick,
    pub actors: Vec<A>,
}

/// Full queue state: buckets ascending by tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot<A> {
    pub buckets: Vec<BucketSnapshot<A>>,
}

impl<A: TurnActor + Clone> TurnQueue<A> {
    /// Clone the queue's full state into an owned snapshot.
    pub fn snapshot(&self) -> QueueSnapshot<A> {
        QueueSnapshot {
            buckets: self
                .buckets()
                .map(|(time, ids)| BucketSnapshot {
                    time,
                    actors: ids.iter().map(|&id| self.payload(id).clone()).collect(),
                })
                .collect(),
        }
    }
}

impl<A: TurnActor> From<QueueSnapshot<A>> for TurnQueue<A> {
    /// Rebuild a queue from a snapshot, preserving bucket order exactly.
    ///
    /// Snapshots are trusted input (they come from serializing a live
    /// queue): empty buckets are dropped, duplicate IDs are a debug
    /// assertion.
    fn from(snap: QueueSnapshot<A>) -> Self {
        let mut queue = TurnQueue::new();
        for bucket in snap.buckets {
            for actor in bucket.actors {
                queue.add(actor, bucket.time);
            }
        }
        queue
    }
}

// ── Direct serde on TurnQueue ─────────────────────────────────────────────────

/// Borrowed view of one bucket; serializes shape-compatibly with
/// [`BucketSnapshot`] so the derived `Deserialize` on the owned type can
/// read it back.
struct BucketRef<'a, A> {
    time: Tick,
    ids: &'a VecDeque<ActorId>,
    queue: &'a TurnQueue<A>,
}

impl<A: TurnActor + Serialize> Serialize for BucketRef<'_, A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BucketSnapshot", 2)?;
        s.serialize_field("time", &self.time)?;
        let actors: Vec<&A> = self.ids.iter().map(|&id| self.queue.payload(id)).collect();
        s.serialize_field("actors", &actors)?;
        s.end()
    }
}

impl<A: TurnActor + Serialize> Serialize for TurnQueue<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("QueueSnapshot", 1)?;
        let buckets: Vec<BucketRef<'_, A>> = self
            .buckets()
            .map(|(time, ids)| BucketRef { time, ids, queue: self })
            .collect();
        s.serialize_field("buckets", &buckets)?;
        s.end()
    }
}

impl<'de, A: TurnActor + Deserialize<'de>> Deserialize<'de> for TurnQueue<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        QueueSnapshot::<A>::deserialize(deserializer).map(TurnQueue::from)
    }
}
