//! Unit tests for tw-queue.

use serde::{Deserialize, Serialize};
use tw_core::{ActorId, Tick, TimeInterval};

use crate::{QueueError, TurnActor, TurnQueue};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal payload: the queue only ever reads `id`, but `name` lets tests
/// check that the exact payload handed to `add` comes back from `remove`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Goblin {
    id: ActorId,
    name: String,
}

impl TurnActor for Goblin {
    fn actor_id(&self) -> ActorId {
        self.id
    }
}

fn goblin(id: u64) -> Goblin {
    Goblin {
        id: ActorId(id),
        name: format!("goblin-{id}"),
    }
}

/// Queue with actors 1..=n all scheduled at `tick`, added in ID order.
fn crowd(n: u64, tick: Tick) -> TurnQueue<Goblin> {
    let mut q = TurnQueue::new();
    for i in 1..=n {
        q.add(goblin(i), tick);
    }
    q
}

/// Drive `k` turns: select, then advance by a cost derived from the turn
/// index.  Returns the selected IDs in order.  Deterministic, so two queues
/// in the same state must produce identical sequences.
fn play(q: &mut TurnQueue<Goblin>, k: usize) -> Vec<ActorId> {
    let mut order = Vec::with_capacity(k);
    for i in 0..k {
        let id = q.next_actor().map(|a| a.actor_id()).unwrap();
        order.push(id);
        q.advance(id, TimeInterval(i as u64 % 3 + 1)).unwrap();
    }
    order
}

// ── Scheduling: add / remove / time_of ────────────────────────────────────────

#[cfg(test)]
mod scheduling {
    use super::*;

    #[test]
    fn add_then_query() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(10));
        assert_eq!(q.len(), 1);
        assert!(q.contains(ActorId(1)));
        assert_eq!(q.time_of(ActorId(1)), Ok(Tick(10)));
        assert_eq!(q.get(ActorId(1)).unwrap().name, "goblin-1");
    }

    #[test]
    fn remove_returns_the_same_payload() {
        let mut q = TurnQueue::new();
        let original = goblin(3);
        q.add(original.clone(), Tick(5));
        let returned = q.remove(ActorId(3)).unwrap();
        assert_eq!(returned, original);
    }

    #[test]
    fn removed_actor_is_unknown() {
        let mut q = crowd(2, Tick(0));
        q.remove(ActorId(1)).unwrap();
        assert_eq!(q.time_of(ActorId(1)), Err(QueueError::UnknownActor(ActorId(1))));
        assert_eq!(
            q.advance(ActorId(1), TimeInterval(5)),
            Err(QueueError::UnknownActor(ActorId(1)))
        );
        assert_eq!(q.remove(ActorId(1)), Err(QueueError::UnknownActor(ActorId(1))));
        assert!(!q.contains(ActorId(1)));
        // The other actor is untouched.
        assert_eq!(q.time_of(ActorId(2)), Ok(Tick(0)));
    }

    #[test]
    fn remove_from_never_added() {
        let mut q: TurnQueue<Goblin> = TurnQueue::new();
        assert_eq!(q.remove(ActorId(9)), Err(QueueError::UnknownActor(ActorId(9))));
    }

    #[test]
    fn emptied_bucket_is_dropped() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(10));
        q.add(goblin(2), Tick(20));
        assert_eq!(q.bucket_count(), 2);
        q.remove(ActorId(1)).unwrap();
        assert_eq!(q.bucket_count(), 1);
        // Tick 20 is now the minimum.
        assert_eq!(q.next_tick(), Some(Tick(20)));
    }

    #[test]
    fn readd_after_remove() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(10));
        let g = q.remove(ActorId(1)).unwrap();
        q.add(g, Tick(99));
        assert_eq!(q.time_of(ActorId(1)), Ok(Tick(99)));
    }

    #[test]
    fn get_mut_edits_payload_in_place() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(0));
        q.get_mut(ActorId(1)).unwrap().name.push_str("-wounded");
        assert_eq!(q.get(ActorId(1)).unwrap().name, "goblin-1-wounded");
        // Scheduling state untouched.
        assert_eq!(q.time_of(ActorId(1)), Ok(Tick(0)));
    }
}

// ── Selection: next_actor / next_tick ─────────────────────────────────────────

#[cfg(test)]
mod selection {
    use super::*;

    #[test]
    fn empty_queue_has_no_next() {
        let mut q: TurnQueue<Goblin> = TurnQueue::new();
        assert!(q.next_actor().is_none());
        assert!(q.next_tick().is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn returns_minimal_tick_actor() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(30));
        q.add(goblin(2), Tick(10));
        q.add(goblin(3), Tick(20));
        assert_eq!(q.next_tick(), Some(Tick(10)));
        let next = q.next_actor().unwrap();
        assert_eq!(next.actor_id(), ActorId(2));
        // Minimality holds against every scheduled actor.
        let t = q.time_of(ActorId(2)).unwrap();
        assert!(q.all_actors().all(|a| q.time_of(a.actor_id()).unwrap() >= t));
    }

    #[test]
    fn fairness_rotation_cycles_ties() {
        // A, B, C tied on one tick, added in that order: three selections
        // visit each once, the fourth wraps back to A.
        let mut q = crowd(3, Tick(7));
        let picks: Vec<ActorId> = (0..4).map(|_| q.next_actor().unwrap().actor_id()).collect();
        assert_eq!(
            picks,
            vec![ActorId(1), ActorId(2), ActorId(3), ActorId(1)]
        );
    }

    #[test]
    fn selection_does_not_change_times() {
        let mut q = crowd(3, Tick(7));
        q.next_actor();
        q.next_actor();
        for i in 1..=3 {
            assert_eq!(q.time_of(ActorId(i)), Ok(Tick(7)));
        }
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn interleaved_scenario() {
        // add A@10, B@10, C@12 — then the exact interleaving from the turn
        // loop: each selected actor is advanced by its action cost.
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(10)); // A
        q.add(goblin(2), Tick(10)); // B
        q.add(goblin(3), Tick(12)); // C

        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(1));
        assert_eq!(q.advance(ActorId(1), TimeInterval(5)), Ok(Tick(15)));

        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(2));
        assert_eq!(q.advance(ActorId(2), TimeInterval(1)), Ok(Tick(11)));

        // B at 11 still beats C at 12.
        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(2));
        assert_eq!(q.advance(ActorId(2), TimeInterval(5)), Ok(Tick(16)));

        // Now C's 12 is minimal.
        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(3));
    }

    #[test]
    fn advanced_actor_joins_tail_of_destination_bucket() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(10));
        q.add(goblin(2), Tick(12));
        q.next_actor(); // selects 1
        q.advance(ActorId(1), TimeInterval(2)).unwrap(); // 1 joins bucket 12 behind 2
        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(2));
        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(1));
    }
}

// ── Rescheduling: advance ─────────────────────────────────────────────────────

#[cfg(test)]
mod advance {
    use super::*;

    #[test]
    fn time_strictly_increases() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(0));
        let mut last = Tick(0);
        for cost in [1u64, 3, 1, 40, 2] {
            let t = q.advance(ActorId(1), TimeInterval(cost)).unwrap();
            assert!(t > last);
            assert_eq!(t, last + cost);
            last = t;
        }
        assert_eq!(q.time_of(ActorId(1)), Ok(Tick(47)));
    }

    #[test]
    fn zero_interval_rejected() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(10));
        assert_eq!(
            q.advance(ActorId(1), TimeInterval::ZERO),
            Err(QueueError::NonPositiveInterval)
        );
        // Rejection leaves the actor exactly where it was.
        assert_eq!(q.time_of(ActorId(1)), Ok(Tick(10)));
        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(1));
    }

    #[test]
    fn advance_unknown_actor() {
        let mut q: TurnQueue<Goblin> = TurnQueue::new();
        assert_eq!(
            q.advance(ActorId(5), TimeInterval(1)),
            Err(QueueError::UnknownActor(ActorId(5)))
        );
    }

    #[test]
    fn buckets_merge_and_split() {
        let mut q = TurnQueue::new();
        q.add(goblin(1), Tick(10));
        q.add(goblin(2), Tick(10));
        assert_eq!(q.bucket_count(), 1);
        q.advance(ActorId(1), TimeInterval(5)).unwrap();
        assert_eq!(q.bucket_count(), 2); // {10: [2], 15: [1]}
        q.advance(ActorId(2), TimeInterval(5)).unwrap();
        assert_eq!(q.bucket_count(), 1); // both at 15, 2 behind 1
        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(1));
        assert_eq!(q.next_actor().unwrap().actor_id(), ActorId(2));
    }
}

// ── Structural invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    /// Every actor visible through `all_actors` agrees with the reverse map,
    /// the traversal is ascending by tick, and the count matches `len`.
    fn check(q: &TurnQueue<Goblin>) {
        let mut seen = 0;
        let mut last_tick = Tick::ZERO;
        for a in q.all_actors() {
            let t = q.time_of(a.actor_id()).unwrap();
            assert!(t >= last_tick, "traversal not ascending");
            last_tick = t;
            seen += 1;
        }
        assert_eq!(seen, q.len());
    }

    #[test]
    fn hold_through_mixed_operations() {
        let mut q = crowd(6, Tick(100));
        check(&q);

        q.advance(ActorId(2), TimeInterval(3)).unwrap();
        q.advance(ActorId(5), TimeInterval(1)).unwrap();
        check(&q);

        q.remove(ActorId(4)).unwrap();
        q.next_actor();
        q.next_actor();
        check(&q);

        q.add(goblin(4), Tick(100)); // transplanted back in
        q.advance(ActorId(1), TimeInterval(200)).unwrap();
        check(&q);

        // Drain completely.
        for id in [1u64, 2, 3, 4, 5, 6] {
            q.remove(ActorId(id)).unwrap();
        }
        assert!(q.is_empty());
        assert_eq!(q.bucket_count(), 0);
        check(&q);
    }

    #[test]
    fn all_actors_order_is_time_then_bucket() {
        let mut q = TurnQueue::new();
        q.add(goblin(5), Tick(20));
        q.add(goblin(1), Tick(10));
        q.add(goblin(2), Tick(10));
        q.add(goblin(9), Tick(30));
        let ids: Vec<ActorId> = q.all_actors().map(|a| a.actor_id()).collect();
        assert_eq!(ids, vec![ActorId(1), ActorId(2), ActorId(5), ActorId(9)]);
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use super::*;
    use crate::QueueSnapshot;

    #[test]
    fn snapshot_preserves_bucket_order() {
        let mut q = crowd(3, Tick(7));
        q.next_actor(); // rotate: bucket is now [2, 3, 1]
        let snap = q.snapshot();
        assert_eq!(snap.buckets.len(), 1);
        assert_eq!(snap.buckets[0].time, Tick(7));
        let ids: Vec<ActorId> = snap.buckets[0].actors.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![ActorId(2), ActorId(3), ActorId(1)]);
    }

    #[test]
    fn rebuilt_queue_replays_identically() {
        let mut q = crowd(4, Tick(0));
        q.advance(ActorId(3), TimeInterval(2)).unwrap();
        q.next_actor(); // leave a mid-rotation cursor in the snapshot

        let mut restored: TurnQueue<Goblin> = q.snapshot().into();
        assert_eq!(play(&mut q, 20), play(&mut restored, 20));
    }

    #[test]
    fn json_round_trip() {
        let mut q = crowd(5, Tick(10));
        q.add(goblin(9), Tick(3));
        q.next_actor();
        q.advance(ActorId(9), TimeInterval(7)).unwrap();
        q.next_actor();

        let json = serde_json::to_string(&q).unwrap();
        let mut restored: TurnQueue<Goblin> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), q.len());
        assert_eq!(restored.next_tick(), q.next_tick());
        assert_eq!(play(&mut q, 30), play(&mut restored, 30));
    }

    #[test]
    fn snapshot_round_trips_through_json_itself() {
        let q = crowd(3, Tick(1));
        let snap = q.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: QueueSnapshot<Goblin> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn empty_queue_round_trip() {
        let q: TurnQueue<Goblin> = TurnQueue::new();
        let json = serde_json::to_string(&q).unwrap();
        let restored: TurnQueue<Goblin> = serde_json::from_str(&json).unwrap();
        assert!(restored.is_empty());
    }
}
