//! Yearly encounter pass.
//!
//! Eligible cultivators (alive, tier above Qi Refining) are partitioned by
//! tier once, before any duel. Each tier with at least two members rolls an
//! encounter for every member with probability `tier_size / eligible_total`.
//! An initiator picks a random living tier-mate; the duel happens when either
//! side is willing, and its outcome always uses the initiator's win
//! probability. Losers die on the spot and are skipped for the rest of the
//! pass, both as initiators and as opponents.

use crate::{
    cultivator::Cultivator,
    engine::{System, SystemContext},
    rng::RandomSource,
    tier::{Tier, TIER_COUNT},
    world::World,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CombatOutcome {
    pub encounters: u64,
    pub battles: u64,
    pub deaths: u64,
}

pub struct CombatSystem;

impl CombatSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CombatSystem {
    fn name(&self) -> &str {
        "combat"
    }

    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut dyn RandomSource) {
        let outcome = resolve(&mut world.cultivators, ctx.absorption_rate, rng);
        world.ledger.battles += outcome.battles;
        world.ledger.deaths += outcome.deaths;
    }
}

/// Frozen tier membership plus the subset still alive during the pass.
struct Bracket {
    members: Vec<usize>,
    living: Vec<usize>,
}

pub fn resolve(
    cultivators: &mut [Cultivator],
    absorption_rate: f64,
    rng: &mut dyn RandomSource,
) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();
    let mut brackets = partition(cultivators);
    let eligible: usize = brackets.iter().map(|b| b.members.len()).sum();
    if eligible == 0 {
        return outcome;
    }

    // slots[i] is the position of cultivator i inside its bracket's `living`.
    let mut slots = vec![usize::MAX; cultivators.len()];
    for bracket in &brackets {
        for (slot, &index) in bracket.living.iter().enumerate() {
            slots[index] = slot;
        }
    }

    for bracket in brackets.iter_mut().filter(|b| b.members.len() >= 2) {
        let encounter_chance = bracket.members.len() as f64 / eligible as f64;
        for position in 0..bracket.members.len() {
            let initiator = bracket.members[position];
            if !cultivators[initiator].alive {
                continue;
            }
            if rng.next_uniform() >= encounter_chance {
                continue;
            }
            let Some(opponent) = pick_opponent(&bracket.living, &slots, initiator, rng) else {
                continue;
            };
            outcome.encounters += 1;
            if let Some(loser) = duel(cultivators, initiator, opponent, absorption_rate, rng) {
                outcome.battles += 1;
                outcome.deaths += 1;
                remove_living(&mut bracket.living, &mut slots, loser);
            }
        }
    }
    outcome
}

fn partition(cultivators: &[Cultivator]) -> Vec<Bracket> {
    let mut brackets: Vec<Bracket> = (0..TIER_COUNT)
        .map(|_| Bracket {
            members: Vec::new(),
            living: Vec::new(),
        })
        .collect();
    for (index, cultivator) in cultivators.iter().enumerate() {
        if cultivator.alive && cultivator.tier > Tier::QiRefining {
            brackets[cultivator.tier.rank()].members.push(index);
        }
    }
    for bracket in &mut brackets {
        bracket.living = bracket.members.clone();
    }
    brackets
}

/// Uniform pick among living tier-mates other than `initiator`.
fn pick_opponent(
    living: &[usize],
    slots: &[usize],
    initiator: usize,
    rng: &mut dyn RandomSource,
) -> Option<usize> {
    if living.len() < 2 {
        return None;
    }
    let own = slots[initiator];
    let last = living.len() - 1;
    let pick = rng.next_index(last);
    // The initiator's own slot stands in for the last entry.
    Some(if pick == own { living[last] } else { living[pick] })
}

fn remove_living(living: &mut Vec<usize>, slots: &mut [usize], index: usize) {
    let slot = slots[index];
    living.swap_remove(slot);
    if let Some(&moved) = living.get(slot) {
        slots[moved] = slot;
    }
    slots[index] = usize::MAX;
}

/// Returns the loser's index when a fight takes place.
fn duel(
    cultivators: &mut [Cultivator],
    initiator: usize,
    opponent: usize,
    absorption_rate: f64,
    rng: &mut dyn RandomSource,
) -> Option<usize> {
    let (challenger, defender) = pair_mut(cultivators, initiator, opponent);
    if !challenger.decides_to_fight(defender) && !defender.decides_to_fight(challenger) {
        return None;
    }

    let challenger_wins = rng.next_uniform() < challenger.win_probability(defender);
    let (winner, loser, loser_index) = if challenger_wins {
        (challenger, defender, opponent)
    } else {
        (defender, challenger, initiator)
    };
    winner.absorb(loser, absorption_rate);
    loser.battles += 1;
    loser.alive = false;
    Some(loser_index)
}

fn pair_mut(
    cultivators: &mut [Cultivator],
    first: usize,
    second: usize,
) -> (&mut Cultivator, &mut Cultivator) {
    debug_assert_ne!(first, second);
    if first < second {
        let (left, right) = cultivators.split_at_mut(second);
        (&mut left[first], &mut right[0])
    } else {
        let (left, right) = cultivators.split_at_mut(first);
        (&mut right[0], &mut left[second])
    }
}
