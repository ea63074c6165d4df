//! skirmish — smallest example for the turnwheel scheduler.
//!
//! Six fighters brawl until one is left standing.  Each turn the queue picks
//! whoever is due next; the fighter swings at a random living opponent and
//! reports the action's cost back via `advance`.  Downed fighters leave the
//! queue through `remove` (payload ownership returned to the arena).
//!
//! Mid-battle the whole queue is serialized to JSON and reloaded, and play
//! resumes from the restored copy — demonstrating that a snapshot carries
//! the fairness rotation along with the (actor, tick) pairs.

use anyhow::Result;

use rustc_hash::FxHashMap;

use serde::{Deserialize, Serialize};
use tw_core::{ActorId, ActorRng, SimRng, Tick, TimeInterval};
use tw_queue::{TurnActor, TurnQueue};

// ── Constants ─────────────────────────────────────────────────────────────────

const FIGHTER_COUNT:    u64   = 6;
const SEED:             u64   = 42;
const SNAPSHOT_AT_TURN: usize = 40;  // save/reload the queue on this turn
const MAX_TURNS:        usize = 500; // safety bound; fights end well before

const NAMES: [&str; 6] = ["Askel", "Brakka", "Corven", "Drusa", "Eldin", "Fyrra"];

// ── Fighter ───────────────────────────────────────────────────────────────────

#[derive(Clone, Serialize, Deserialize)]
struct Fighter {
    id: ActorId,
    name: String,
    hp: i32,
    kills: u32,
}

impl TurnActor for Fighter {
    fn actor_id(&self) -> ActorId {
        self.id
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== skirmish — turnwheel demo ===");
    println!("Fighters: {FIGHTER_COUNT}  |  Seed: {SEED}");
    println!();

    // 1. Roll up fighters.  The queue owns the payloads; per-fighter RNGs
    //    stay outside with the arena (they are not scheduling state).
    let mut world = SimRng::new(SEED);
    let mut queue: TurnQueue<Fighter> = TurnQueue::new();
    let mut rngs: FxHashMap<ActorId, ActorRng> = FxHashMap::default();

    for i in 0..FIGHTER_COUNT {
        let id = ActorId(i);
        let fighter = Fighter {
            id,
            name: NAMES[i as usize].to_string(),
            hp: world.gen_range(14..=20),
            kills: 0,
        };
        let entry_tick = Tick(world.gen_range(0..4u64));
        println!(
            "  {} enters at {} with {} hp",
            fighter.name, entry_tick, fighter.hp
        );
        queue.add(fighter, entry_tick);
        rngs.insert(id, ActorRng::new(SEED, id));
    }
    println!();

    // 2. Turn loop: select → act externally → report cost.
    let mut fallen: Vec<Fighter> = Vec::new();
    let mut turn = 0;

    while queue.len() > 1 && turn < MAX_TURNS {
        turn += 1;

        if turn == SNAPSHOT_AT_TURN {
            let json = serde_json::to_string(&queue)?;
            queue = serde_json::from_str(&json)?;
            println!(
                "-- turn {turn}: queue saved and reloaded ({} bytes, {} fighters, next {}) --",
                json.len(),
                queue.len(),
                queue.next_tick().unwrap()
            );
        }

        let Some(actor) = queue.next_actor() else { break };
        let id = actor.actor_id();
        let name = actor.name.clone();

        // Pick any other fighter still in the queue.
        let targets: Vec<ActorId> = queue
            .all_actors()
            .map(|f| f.actor_id())
            .filter(|&t| t != id)
            .collect();
        let rng = rngs.get_mut(&id).unwrap();
        let &target = rng.choose(&targets).unwrap();
        let damage = rng.gen_range(1..=5);
        let cost = TimeInterval(rng.gen_range(1..=6u64));

        let victim = queue.get_mut(target).unwrap();
        victim.hp -= damage;
        let victim_name = victim.name.clone();
        let downed = victim.hp <= 0;

        if downed {
            // Ownership of the payload comes back out of the queue.
            let body = queue.remove(target)?;
            rngs.remove(&target);
            fallen.push(body);
            queue.get_mut(id).unwrap().kills += 1;
        }

        let next_at = queue.advance(id, cost)?;
        println!(
            "turn {turn:3}  {name} hits {victim_name} for {damage}{}  (cost {cost}, next at {next_at})",
            if downed { " — downed!" } else { "" }
        );
    }
    println!();

    // 3. Summary table.
    println!("{:<10} {:<8} {:<6} {:<6}", "Fighter", "Status", "HP", "Kills");
    println!("{}", "-".repeat(32));
    for f in queue.all_actors() {
        println!("{:<10} {:<8} {:<6} {:<6}", f.name, "standing", f.hp, f.kills);
    }
    for f in fallen.iter().rev() {
        println!("{:<10} {:<8} {:<6} {:<6}", f.name, "fallen", f.hp, f.kills);
    }

    Ok(())
}
