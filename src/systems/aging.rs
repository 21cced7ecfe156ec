use crate::{
    engine::{System, SystemContext},
    rng::RandomSource,
    world::World,
};

/// One year of cultivation for everyone; the dead are left untouched.
pub struct AgingSystem;

impl AgingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AgingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for AgingSystem {
    fn name(&self) -> &str {
        "aging"
    }

    fn run(&mut self, _ctx: &SystemContext, world: &mut World, _rng: &mut dyn RandomSource) {
        for cultivator in world.cultivators.iter_mut() {
            cultivator.age_one_year();
        }
    }
}
