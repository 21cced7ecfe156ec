use serde::{Deserialize, Serialize};

use crate::cultivator::{Cultivator, CultivatorId};
use crate::tier::{Tier, TIER_COUNT};

/// Alive cultivators per tier, indexed by rank. Every tier is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCensus([u64; TIER_COUNT]);

impl TierCensus {
    pub fn from_alive<'a>(cultivators: impl IntoIterator<Item = &'a Cultivator>) -> Self {
        let mut counts = [0_u64; TIER_COUNT];
        for cultivator in cultivators.into_iter().filter(|c| c.alive) {
            counts[cultivator.tier.rank()] += 1;
        }
        Self(counts)
    }

    pub fn count(&self, tier: Tier) -> u64 {
        self.0[tier.rank()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, u64)> + '_ {
        Tier::ALL.iter().map(move |tier| (*tier, self.count(*tier)))
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Highest tier holding at least one cultivator.
    pub fn highest_occupied(&self) -> Option<(Tier, u64)> {
        Tier::ALL
            .iter()
            .rev()
            .map(|tier| (*tier, self.count(*tier)))
            .find(|(_, count)| *count > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlayerRecord {
    pub id: CultivatorId,
    pub defeats: u32,
    pub tier: Tier,
    pub power: u64,
}

impl SlayerRecord {
    fn of(cultivator: &Cultivator) -> Self {
        Self {
            id: cultivator.id,
            defeats: cultivator.defeats,
            tier: cultivator.tier,
            power: cultivator.power,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStatistics {
    pub year: u64,
    pub alive: u64,
    pub battles: u64,
    /// Cultivators slain in duels this year; deaths from old age are not counted.
    pub deaths: u64,
    pub census: TierCensus,
    /// `None` marks a year that ended with nobody alive.
    pub top_slayer: Option<SlayerRecord>,
}

/// Alive cultivator with the most defeats; the earliest one wins ties.
pub fn top_slayer(cultivators: &[Cultivator]) -> Option<&Cultivator> {
    cultivators
        .iter()
        .filter(|c| c.alive)
        .fold(None, |best: Option<&Cultivator>, candidate| match best {
            Some(current) if current.defeats >= candidate.defeats => Some(current),
            _ => Some(candidate),
        })
}

/// Alive cultivator with the most power; the earliest one wins ties.
pub fn strongest(cultivators: &[Cultivator]) -> Option<&Cultivator> {
    cultivators
        .iter()
        .filter(|c| c.alive)
        .fold(None, |best: Option<&Cultivator>, candidate| match best {
            Some(current) if current.power >= candidate.power => Some(current),
            _ => Some(candidate),
        })
}

impl YearStatistics {
    pub fn capture(year: u64, battles: u64, deaths: u64, cultivators: &[Cultivator]) -> Self {
        let census = TierCensus::from_alive(cultivators);
        Self {
            year,
            alive: census.total(),
            battles,
            deaths,
            census,
            top_slayer: top_slayer(cultivators).map(SlayerRecord::of),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cultivator(id: u64, tier: Tier, defeats: u32, alive: bool) -> Cultivator {
        let mut c = Cultivator::new(CultivatorId::new(id), 20, 0.5).with_standing(tier, 10);
        c.defeats = defeats;
        c.alive = alive;
        c
    }

    #[test]
    fn census_covers_every_tier_and_skips_the_dead() {
        let roster = vec![
            cultivator(1, Tier::Foundation, 0, true),
            cultivator(2, Tier::Foundation, 0, false),
            cultivator(3, Tier::NascentSoul, 0, true),
        ];
        let census = TierCensus::from_alive(&roster);
        assert_eq!(census.iter().count(), TIER_COUNT);
        assert_eq!(census.count(Tier::Foundation), 1);
        assert_eq!(census.count(Tier::NascentSoul), 1);
        assert_eq!(census.count(Tier::Mahayana), 0);
        assert_eq!(census.highest_occupied(), Some((Tier::NascentSoul, 1)));
    }

    #[test]
    fn top_slayer_prefers_first_on_ties_and_ignores_dead() {
        let roster = vec![
            cultivator(1, Tier::Foundation, 9, false),
            cultivator(2, Tier::Foundation, 3, true),
            cultivator(3, Tier::Foundation, 3, true),
            cultivator(4, Tier::Foundation, 1, true),
        ];
        assert_eq!(top_slayer(&roster).map(|c| c.id.raw()), Some(2));
    }

    #[test]
    fn empty_population_records_explicit_marker() {
        let roster = vec![cultivator(1, Tier::Foundation, 4, false)];
        let stats = YearStatistics::capture(3, 0, 0, &roster);
        assert_eq!(stats.alive, 0);
        assert_eq!(stats.top_slayer, None);
        assert_eq!(stats.census.highest_occupied(), None);
        let json = serde_json::to_value(&stats).expect("serialize");
        assert!(json["top_slayer"].is_null());
    }
}
