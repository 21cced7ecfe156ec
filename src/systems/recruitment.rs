use tracing::debug;

use crate::{
    cultivator::Cultivator,
    engine::{System, SystemContext},
    rng::RandomSource,
    tier::Tier,
    world::World,
};

const START_AGE_MEAN: f64 = 8.0;
const START_AGE_STD_DEV: f64 = 1.0;
const START_AGE_MIN: f64 = 6.0;
const START_AGE_MAX: f64 = 10.0;
/// Years spent reaching Foundation before a recruit is tracked.
pub const QUALIFICATION_YEARS: u64 = 10;
pub const RECRUIT_POWER: u64 = 10;
const COURAGE_MEAN: f64 = 0.5;
const COURAGE_STD_DEV: f64 = 0.15;

/// Admits freshly qualified Foundation cultivators each year.
pub struct RecruitmentSystem;

impl RecruitmentSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecruitmentSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RecruitmentSystem {
    fn name(&self) -> &str {
        "recruitment"
    }

    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut dyn RandomSource) {
        recruit(world, ctx.spawn_per_year, rng);
    }
}

/// Admits `count` recruits dated to the world's current year.
pub fn recruit(world: &mut World, count: u32, rng: &mut dyn RandomSource) {
    let year = world.year();
    for _ in 0..count {
        let start_age = rng
            .next_normal(START_AGE_MEAN, START_AGE_STD_DEV)
            .clamp(START_AGE_MIN, START_AGE_MAX)
            .round() as u64;
        let age = start_age + QUALIFICATION_YEARS;
        let courage = rng.next_normal(COURAGE_MEAN, COURAGE_STD_DEV).clamp(0.0, 1.0);
        let birth_year = (year as i64 - age as i64 + 1).max(1) as u64;
        world.admit(|id| {
            let mut recruit =
                Cultivator::new(id, age, courage).with_standing(Tier::Foundation, RECRUIT_POWER);
            recruit.birth_year = birth_year;
            recruit
        });
    }
    debug!(year, count, "recruits admitted");
}
