//! Human-readable views over a world. Nothing here mutates simulation state.

use std::fmt;

use crate::{
    cultivator::Cultivator,
    stats::{self, TierCensus},
    tier::{Tier, BASE_LIFESPAN, TIER_TABLE},
    world::World,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TierProfile {
    pub tier: Tier,
    pub count: usize,
    pub mean_courage: f64,
    pub mean_battles: f64,
    pub mean_remaining_lifespan: f64,
}

/// Per-tier averages over alive cultivators; empty tiers are omitted.
pub fn tier_profiles(cultivators: &[Cultivator]) -> Vec<TierProfile> {
    Tier::ALL
        .iter()
        .filter_map(|tier| {
            let members: Vec<&Cultivator> = cultivators
                .iter()
                .filter(|c| c.alive && c.tier == *tier)
                .collect();
            if members.is_empty() {
                return None;
            }
            let count = members.len();
            let mean = |value: fn(&Cultivator) -> f64| {
                members.iter().map(|c| value(*c)).sum::<f64>() / count as f64
            };
            Some(TierProfile {
                tier: *tier,
                count,
                mean_courage: mean(|c| c.courage),
                mean_battles: mean(|c| c.battles as f64),
                mean_remaining_lifespan: mean(|c| c.remaining_lifespan() as f64),
            })
        })
        .collect()
}

pub struct StatusReport<'a> {
    year: u64,
    cultivators: &'a [Cultivator],
}

impl<'a> StatusReport<'a> {
    pub fn new(world: &'a World) -> Self {
        Self {
            year: world.year(),
            cultivators: world.cultivators(),
        }
    }
}

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let census = TierCensus::from_alive(self.cultivators);
        writeln!(f, "=== Year {} ===", self.year)?;
        writeln!(f, "Alive cultivators: {}", census.total())?;
        for (tier, count) in census.iter().filter(|(_, count)| *count > 0) {
            writeln!(f, "  {tier}: {count}")?;
        }

        let profiles = tier_profiles(self.cultivators);
        if !profiles.is_empty() {
            writeln!(f, "--- Tier profiles ---")?;
        }
        for profile in &profiles {
            writeln!(
                f,
                "{} ({}): mean courage {:.3}, mean battles {:.1}, mean remaining lifespan {:.1} years",
                profile.tier,
                profile.count,
                profile.mean_courage,
                profile.mean_battles,
                profile.mean_remaining_lifespan
            )?;
        }

        let Some(strongest) = stats::strongest(self.cultivators) else {
            return writeln!(f, "No cultivators remain.");
        };
        writeln!(f, "--- Strongest cultivator ---")?;
        writeln!(f, "{}: {}", strongest.id, strongest.tier)?;
        writeln!(f, "Power: {}", strongest.power)?;
        if strongest.birth_year > 0 {
            writeln!(f, "Born: year {}", strongest.birth_year)?;
        } else {
            writeln!(f, "Born: before the simulation began")?;
        }
        writeln!(f, "Defeats: {}", strongest.defeats)?;
        writeln!(f, "Courage: {:.3}", strongest.courage)?;
        writeln!(
            f,
            "Age: {}, remaining lifespan: {} years",
            strongest.age,
            strongest.remaining_lifespan()
        )?;

        if let Some(slayer) = stats::top_slayer(self.cultivators) {
            if slayer.defeats > 0 && slayer.id != strongest.id {
                writeln!(f, "--- Top slayer ---")?;
                writeln!(f, "{}: {}", slayer.id, slayer.tier)?;
                writeln!(f, "Defeats: {}", slayer.defeats)?;
                writeln!(f, "Courage: {:.3}", slayer.courage)?;
            }
        }
        Ok(())
    }
}

/// What would happen if `first` and `second` met.
pub struct DuelPreview<'a> {
    first: &'a Cultivator,
    second: &'a Cultivator,
    absorption_rate: f64,
}

impl<'a> DuelPreview<'a> {
    pub fn new(first: &'a Cultivator, second: &'a Cultivator, absorption_rate: f64) -> Self {
        Self {
            first,
            second,
            absorption_rate,
        }
    }

    pub fn combat_occurs(&self) -> bool {
        self.first.decides_to_fight(self.second) || self.second.decides_to_fight(self.first)
    }
}

impl fmt::Display for DuelPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (me, them) in [(self.first, self.second), (self.second, self.first)] {
            writeln!(
                f,
                "{}: power {}, courage {:.2}, defeats {}",
                me.id, me.power, me.courage, me.defeats
            )?;
            let win = me.win_probability(them);
            writeln!(
                f,
                "  win rate {:.2}, defeat rate {:.2}, fights: {}",
                win,
                1.0 - win,
                me.decides_to_fight(them)
            )?;
        }
        if self.combat_occurs() {
            writeln!(
                f,
                "Combat occurs; the victor absorbs {:.1}% of the loser's power.",
                self.absorption_rate * 100.0
            )
        } else {
            writeln!(f, "Both sides back down; nothing happens.")
        }
    }
}

/// The promotion requirements table.
pub struct TierRequirements;

impl fmt::Display for TierRequirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Base lifespan: {BASE_LIFESPAN} years")?;
        for spec in &TIER_TABLE {
            writeln!(
                f,
                "{}: {} power, +{} years on promotion",
                spec.name, spec.threshold, spec.lifespan_bonus
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cultivator::CultivatorId;

    fn foundation(world: &mut World, power: u64, courage: f64, defeats: u32) {
        world.admit(|id| {
            let mut c = Cultivator::new(id, 20, courage).with_standing(Tier::Foundation, power);
            c.defeats = defeats;
            c
        });
    }

    #[test]
    fn profiles_average_alive_members_only() {
        let mut world = World::new();
        foundation(&mut world, 10, 0.2, 0);
        foundation(&mut world, 10, 0.6, 0);
        world.cultivators[1].battles = 4;
        foundation(&mut world, 10, 1.0, 0);
        world.cultivators[2].alive = false;

        let profiles = tier_profiles(world.cultivators());
        assert_eq!(profiles.len(), 1);
        let profile = &profiles[0];
        assert_eq!(profile.count, 2);
        assert!((profile.mean_courage - 0.4).abs() < 1e-9);
        assert!((profile.mean_battles - 2.0).abs() < 1e-9);
        assert!((profile.mean_remaining_lifespan - 80.0).abs() < 1e-9);
    }

    #[test]
    fn report_names_strongest_and_distinct_slayer() {
        let mut world = World::new();
        foundation(&mut world, 500, 0.4, 1);
        foundation(&mut world, 90, 0.9, 3);
        let text = StatusReport::new(&world).to_string();
        assert!(text.contains("Alive cultivators: 2"));
        assert!(text.contains("Foundation: 2"));
        assert!(text.contains("--- Strongest cultivator ---\n#1: Foundation"));
        assert!(text.contains("--- Top slayer ---\n#2: Foundation"));
    }

    #[test]
    fn report_handles_empty_world() {
        let world = World::new();
        let text = StatusReport::new(&world).to_string();
        assert!(text.contains("Alive cultivators: 0"));
        assert!(text.contains("No cultivators remain."));
    }

    #[test]
    fn preview_matches_courage_rules() {
        let bold =
            Cultivator::new(CultivatorId::new(1), 20, 0.8).with_standing(Tier::Foundation, 50);
        let timid =
            Cultivator::new(CultivatorId::new(2), 20, 0.3).with_standing(Tier::Foundation, 60);
        let preview = DuelPreview::new(&bold, &timid, 0.1);
        assert!(preview.combat_occurs());
        let text = preview.to_string();
        assert!(text.contains("win rate 0.45, defeat rate 0.55, fights: true"));
        assert!(text.contains("win rate 0.55, defeat rate 0.45, fights: false"));
        assert!(text.contains("absorbs 10.0%"));
    }

    #[test]
    fn requirements_list_every_tier() {
        let text = TierRequirements.to_string();
        assert_eq!(text.lines().count(), 1 + TIER_TABLE.len());
        assert!(text.contains("Mahayana: 100000000 power, +80000000 years on promotion"));
    }
}
