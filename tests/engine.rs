use cultivation_sim::{
    cultivator::Cultivator,
    engine::{Engine, EngineBuilder, EngineSettings},
    rng::ScriptedRng,
    tier::Tier,
    world::World,
};

fn settings(seed: u64, absorption_rate: f64, spawn_per_year: u32) -> EngineSettings {
    EngineSettings {
        seed,
        absorption_rate,
        spawn_per_year,
    }
}

fn seeded_run(seed: u64, years: u64) -> World {
    let mut world = World::new();
    let mut engine: Engine = EngineBuilder::new(settings(seed, 0.3, 40)).build();
    engine.populate(&mut world, 60);
    engine.run(&mut world, years);
    world
}

#[test]
fn engine_runs_hook_each_year() {
    let mut world = World::new();
    let mut engine = EngineBuilder::new(settings(3, 0.1, 5)).build();
    engine.populate(&mut world, 5);

    let mut years = Vec::new();
    engine.run_with_hook(&mut world, 6, |world| years.push(world.year()));

    assert_eq!(years, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(world.history().len(), 6);
    assert_eq!(world.cultivators().len(), 5 + 6 * 5);
}

#[test]
fn identical_seeds_replay_identical_histories() {
    let a = seeded_run(99, 80);
    let b = seeded_run(99, 80);
    assert_eq!(a.history(), b.history());
    assert_eq!(a.cultivators(), b.cultivators());
}

#[test]
fn different_seeds_diverge() {
    let a = seeded_run(1, 40);
    let b = seeded_run(2, 40);
    assert_ne!(a.cultivators(), b.cultivators());
}

#[test]
fn zero_spawn_year_still_records_statistics() {
    let mut world = World::new();
    let mut engine = EngineBuilder::new(settings(5, 0.1, 0)).build();
    engine.populate(&mut world, 3);
    let before = world.cultivators().len();

    let year = engine.tick(&mut world);

    assert_eq!(year, 1);
    assert_eq!(world.cultivators().len(), before);
    assert_eq!(world.history().len(), 1);
    assert_eq!(world.latest().map(|s| s.year), Some(1));
}

#[test]
fn empty_world_records_explicit_empty_years() {
    let mut world = World::new();
    let mut engine = EngineBuilder::new(settings(5, 0.1, 0)).build();
    engine.run(&mut world, 3);

    assert_eq!(world.history().len(), 3);
    for (index, stats) in world.history().iter().enumerate() {
        assert_eq!(stats.year, index as u64 + 1);
        assert_eq!(stats.alive, 0);
        assert_eq!(stats.battles, 0);
        assert_eq!(stats.top_slayer, None);
        assert_eq!(stats.census.total(), 0);
    }
}

#[test]
fn lone_cultivator_never_fights() {
    let mut world = World::new();
    world.admit(|id| Cultivator::new(id, 20, 1.0).with_standing(Tier::Foundation, 10));
    // Every draw would trigger an encounter and a win if one were possible.
    let mut engine =
        EngineBuilder::new(settings(0, 1.0, 0)).build_with_rng(ScriptedRng::new(vec![0.0]));
    engine.run(&mut world, 50);

    let loner = &world.cultivators()[0];
    assert_eq!(loner.battles, 0);
    assert_eq!(loner.defeats, 0);
    assert!(world.history().iter().all(|s| s.battles == 0));
    assert_eq!(loner.age, 70);
    assert_eq!(loner.power, 60);
}

#[test]
fn cultivators_obey_lifecycle_invariants_every_year() {
    let mut world = World::new();
    let mut engine = EngineBuilder::new(settings(2024, 0.5, 30)).build();
    engine.populate(&mut world, 60);

    let mut previous = world.roster();
    engine.run_with_hook(&mut world, 120, |world| {
        let current = world.cultivators();
        assert_eq!(current.len(), previous.len() + 30);
        for (before, after) in previous.iter().zip(current) {
            assert_eq!(before.id, after.id);
            if !before.alive {
                assert_eq!(before, after, "dead cultivators stay frozen");
                continue;
            }
            assert_eq!(after.age, before.age + 1);
            assert!(after.tier >= before.tier);
            assert!(after.power >= before.power);
            assert!(after.lifespan_cap >= before.lifespan_cap);
            assert!(after.power >= after.tier.threshold() || after.tier == before.tier);
        }

        let stats = world.latest().expect("one record per year");
        assert_eq!(stats.year, world.year());
        assert_eq!(stats.alive, world.alive_count());
        assert!(stats.deaths <= stats.battles);
        previous = world.roster();
    });
    assert_eq!(world.history().len(), 120);
}

#[test]
fn battles_and_deaths_are_counted() {
    let world = seeded_run(7, 60);
    let battles: u64 = world.history().iter().map(|s| s.battles).sum();
    let deaths: u64 = world.history().iter().map(|s| s.deaths).sum();
    let defeats: u64 = world.cultivators().iter().map(|c| c.defeats as u64).sum();
    assert!(battles > 0, "a crowded Foundation tier should see fighting");
    assert_eq!(battles, deaths);
    assert_eq!(defeats, deaths);
}

#[test]
fn deaths_from_old_age_are_not_counted_as_duel_deaths() {
    let mut world = World::new();
    world.admit(|id| Cultivator::new(id, 99, 0.5).with_standing(Tier::Foundation, 10));
    let mut engine = EngineBuilder::new(settings(1, 0.1, 0)).build();
    engine.tick(&mut world);

    assert!(!world.cultivators()[0].alive);
    let stats = world.latest().expect("one record per year");
    assert_eq!(stats.alive, 0);
    assert_eq!(stats.deaths, 0);
    assert_eq!(stats.battles, 0);
}
