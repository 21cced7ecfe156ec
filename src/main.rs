use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cultivation_sim::{
    chart,
    chronicle::Chronicle,
    config::SimulationConfig,
    cultivator::{Cultivator, CultivatorId},
    engine::EngineBuilder,
    export::{self, RunExport},
    report::{self, DuelPreview, StatusReport, TierRequirements},
    scenario::ScenarioLoader,
    tier::Tier,
    world::World,
};

const CHART_POINTS: usize = 100;

#[derive(Debug, Parser)]
#[command(author, version, about = "Cultivation world population simulator")]
struct Cli {
    /// Scenario YAML file; the flags below override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulation horizon in years
    #[arg(long)]
    years: Option<u64>,

    /// Fraction of a defeated opponent's power the victor absorbs, in (0, 1]
    #[arg(long)]
    absorption_rate: Option<f64>,

    /// Recruits admitted every year
    #[arg(long)]
    spawn_per_year: Option<u32>,

    /// Recruits admitted before the first year
    #[arg(long)]
    initial_population: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Years between progress reports (defaults to a tenth of the run)
    #[arg(long)]
    report_interval: Option<u64>,

    /// Suppress periodic progress reports
    #[arg(long)]
    no_progress: bool,

    /// Walk through the duel rules before running
    #[arg(long)]
    demo: bool,

    /// Skip the closing text charts
    #[arg(long)]
    no_charts: bool,

    /// Write statistics, chronicle and final roster as JSON
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.scenario {
            Some(path) => {
                let scenario = ScenarioLoader::new(".").load(path)?;
                info!(scenario = %scenario.summary(), "scenario loaded");
                scenario.to_config()
            }
            None => SimulationConfig::default(),
        };
        if let Some(years) = self.years {
            config.years = years;
        }
        if let Some(rate) = self.absorption_rate {
            config.absorption_rate = rate;
        }
        if let Some(spawn) = self.spawn_per_year {
            config.spawn_per_year = spawn;
        }
        if let Some(initial) = self.initial_population {
            config.initial_population = initial;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.report_interval.is_some() {
            config.report_interval = self.report_interval;
        }
        config.show_progress = !self.no_progress;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = cli.config()?;
    config.validate()?;
    info!(
        years = config.years,
        absorption_rate = config.absorption_rate,
        spawn_per_year = config.spawn_per_year,
        seed = config.seed,
        "starting simulation"
    );

    if cli.demo {
        print_demo(&config);
    }

    let mut world = World::new();
    let mut engine = EngineBuilder::new(config.engine_settings()).build();
    engine.populate(&mut world, config.initial_population);

    let mut chronicle = Chronicle::new();
    let interval = config.report_interval();
    engine.run_with_hook(&mut world, config.years, |world| {
        for entry in chronicle.observe(world) {
            info!(%entry, "succession");
        }
        if config.show_progress && world.year() % interval == 0 {
            println!("{}", StatusReport::new(world));
        }
    });

    println!("=== Simulation complete ===");
    println!("{}", StatusReport::new(&world));
    if !cli.no_charts {
        print_charts(&world);
    }

    if let Some(path) = &cli.export {
        let run = RunExport::new(&config, &world, chronicle.entries());
        let written = export::write_run(path, &run)?;
        info!(path = %written.display(), "run exported");
    }
    info!(
        year = world.year(),
        alive = world.alive_count(),
        admitted = world.cultivators().len(),
        "simulation finished"
    );
    Ok(())
}

fn print_demo(config: &SimulationConfig) {
    let bold =
        Cultivator::new(CultivatorId::new(1), 20, 0.8).with_standing(Tier::Foundation, 50);
    let timid =
        Cultivator::new(CultivatorId::new(2), 20, 0.3).with_standing(Tier::Foundation, 60);
    println!("=== Duel rules ===");
    println!("{}", DuelPreview::new(&bold, &timid, config.absorption_rate));
    println!("=== Tier requirements ===");
    println!("{TierRequirements}");
}

fn print_charts(world: &World) {
    let history = world.history();
    let alive: Vec<u64> = history.iter().map(|s| s.alive).collect();
    let battles: Vec<u64> = history.iter().map(|s| s.battles).collect();
    println!("{}", chart::line_chart("Alive cultivators per year", &alive, CHART_POINTS));
    println!("{}", chart::line_chart("Battles per year", &battles, CHART_POINTS));

    let profiles = report::tier_profiles(world.cultivators());
    if profiles.is_empty() {
        return;
    }
    let census: Vec<(String, f64)> = profiles
        .iter()
        .map(|p| (p.tier.to_string(), p.count as f64))
        .collect();
    let courage: Vec<(String, f64)> = profiles
        .iter()
        .map(|p| (p.tier.to_string(), p.mean_courage))
        .collect();
    println!("{}", chart::bar_chart("Final census by tier", &census));
    println!("{}", chart::bar_chart("Mean courage by tier", &courage));
}
