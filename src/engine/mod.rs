use tracing::{debug, info, trace, warn};

use crate::{
    rng::{RandomSource, SeededRng},
    systems::{recruitment, AgingSystem, CombatSystem, RecruitmentSystem, StatisticsSystem},
    world::World,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub seed: u64,
    pub absorption_rate: f64,
    pub spawn_per_year: u32,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    /// Builder preloaded with the yearly pipeline: aging, recruitment,
    /// combat, statistics.
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
        .with_system(AgingSystem::new())
        .with_system(RecruitmentSystem::new())
        .with_system(CombatSystem::new())
        .with_system(StatisticsSystem::new())
    }

    fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine<SeededRng> {
        let rng = SeededRng::new(self.settings.seed);
        self.build_with_rng(rng)
    }

    /// Swaps in a caller-provided randomness source, e.g. a scripted one.
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> Engine<R> {
        Engine {
            rng,
            systems: self.systems,
            settings: self.settings,
        }
    }
}

pub struct Engine<R: RandomSource = SeededRng> {
    rng: R,
    systems: Vec<Box<dyn System>>,
    settings: EngineSettings,
}

impl<R: RandomSource> Engine<R> {
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Seeds the starting population at the current year, before any tick.
    pub fn populate(&mut self, world: &mut World, count: u32) {
        recruitment::recruit(world, count, &mut self.rng);
        info!(year = world.year(), count, "initial population admitted");
    }

    /// Runs one full year and appends exactly one statistics record.
    pub fn tick(&mut self, world: &mut World) -> u64 {
        world.advance_time();
        let ctx = SystemContext {
            year: world.year(),
            absorption_rate: self.settings.absorption_rate,
            spawn_per_year: self.settings.spawn_per_year,
        };
        for system in &mut self.systems {
            trace!(year = ctx.year, system = system.name(), "running system");
            system.run(&ctx, world, &mut self.rng);
        }
        if let Some(stats) = world.latest() {
            debug!(
                year = stats.year,
                alive = stats.alive,
                battles = stats.battles,
                deaths = stats.deaths,
                "year complete"
            );
        }
        ctx.year
    }

    pub fn run(&mut self, world: &mut World, years: u64) {
        self.run_with_hook(world, years, |_| {});
    }

    /// Like [`Engine::run`], handing the world to `hook` after every year.
    pub fn run_with_hook<F>(&mut self, world: &mut World, years: u64, mut hook: F)
    where
        F: FnMut(&World),
    {
        let mut extinct = world.alive_count() == 0;
        for _ in 0..years {
            self.tick(world);
            let alive = world.alive_count();
            if alive == 0 && !extinct {
                warn!(year = world.year(), "population went extinct");
            }
            extinct = alive == 0;
            hook(world);
        }
    }
}

pub struct SystemContext {
    pub year: u64,
    pub absorption_rate: f64,
    pub spawn_per_year: u32,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut dyn RandomSource);
}
