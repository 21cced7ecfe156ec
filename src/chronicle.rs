//! Succession log for the two titles the simulation tracks: the strongest
//! living cultivator and the living cultivator with the most defeats.

use std::fmt;

use serde::Serialize;

use crate::{
    cultivator::{Cultivator, CultivatorId},
    stats,
    world::World,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Title {
    Strongest,
    TopSlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Succession {
    /// First holder observed.
    Debut,
    /// Previous holder lost a duel.
    Slain,
    /// Previous holder ran out of lifespan.
    LifespanExhausted,
    /// Previous holder is alive but was overtaken.
    Surpassed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChronicleEntry {
    pub year: u64,
    pub title: Title,
    pub previous: Option<CultivatorId>,
    pub current: CultivatorId,
    pub cause: Succession,
}

impl fmt::Display for ChronicleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.title {
            Title::Strongest => "strongest cultivator",
            Title::TopSlayer => "top slayer",
        };
        match (self.cause, self.previous) {
            (Succession::Debut, _) | (_, None) => {
                write!(f, "year {}: {} becomes the first {title}", self.year, self.current)
            }
            (cause, Some(previous)) => {
                let how = match cause {
                    Succession::Slain => "was slain",
                    Succession::LifespanExhausted => "ran out of lifespan",
                    _ => "was overtaken",
                };
                write!(
                    f,
                    "year {}: {previous} {how}; {} is the new {title}",
                    self.year, self.current
                )
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Chronicle {
    strongest: Option<CultivatorId>,
    top_slayer: Option<CultivatorId>,
    entries: Vec<ChronicleEntry>,
}

impl Chronicle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChronicleEntry] {
        &self.entries
    }

    /// Compares the current holders with last observation and returns the
    /// entries recorded for this year.
    pub fn observe(&mut self, world: &World) -> &[ChronicleEntry] {
        let start = self.entries.len();
        let cultivators = world.cultivators();
        let year = world.year();

        let strongest = stats::strongest(cultivators);
        if let Some(current) = strongest {
            if self.strongest != Some(current.id) {
                let previous = self.strongest;
                self.entries.push(ChronicleEntry {
                    year,
                    title: Title::Strongest,
                    previous,
                    current: current.id,
                    cause: cause_for(world, previous),
                });
            }
        }
        self.strongest = strongest.map(|c| c.id);

        let slayer = stats::top_slayer(cultivators);
        if let Some(current) = slayer {
            if self.top_slayer != Some(current.id) && current.defeats > 0 {
                let previous = self.top_slayer;
                self.entries.push(ChronicleEntry {
                    year,
                    title: Title::TopSlayer,
                    previous,
                    current: current.id,
                    cause: cause_for(world, previous),
                });
            }
        }
        self.top_slayer = slayer.map(|c| c.id);

        &self.entries[start..]
    }
}

fn cause_for(world: &World, previous: Option<CultivatorId>) -> Succession {
    match previous.and_then(|id| world.cultivator(id)) {
        None => Succession::Debut,
        Some(holder) if holder.alive => Succession::Surpassed,
        Some(holder) if lost_a_duel(holder) => Succession::Slain,
        Some(_) => Succession::LifespanExhausted,
    }
}

/// Every win adds to both counters, a loss only to `battles`, so a gap
/// means a lost duel.
fn lost_a_duel(cultivator: &Cultivator) -> bool {
    cultivator.battles > cultivator.defeats
}
