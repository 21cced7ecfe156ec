use crate::{
    engine::{System, SystemContext},
    rng::RandomSource,
    stats::YearStatistics,
    world::World,
};

/// Appends the year's snapshot; runs last in the pipeline.
pub struct StatisticsSystem;

impl StatisticsSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatisticsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for StatisticsSystem {
    fn name(&self) -> &str {
        "statistics"
    }

    fn run(&mut self, _ctx: &SystemContext, world: &mut World, _rng: &mut dyn RandomSource) {
        let ledger = world.ledger();
        let record = YearStatistics::capture(
            world.year(),
            ledger.battles,
            ledger.deaths,
            &world.cultivators,
        );
        world.history.push(record);
    }
}
