use serde::{Deserialize, Serialize};

/// Lifespan every cultivator starts with before any promotion bonus.
pub const BASE_LIFESPAN: u64 = 100;

pub const TIER_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    QiRefining,
    Foundation,
    CoreFormation,
    NascentSoul,
    SpiritSevering,
    VoidRefining,
    Integration,
    Mahayana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSpec {
    pub name: &'static str,
    /// Power needed to enter this tier.
    pub threshold: u64,
    /// Added to the lifespan cap when a cultivator is promoted into this tier.
    pub lifespan_bonus: u64,
}

pub static TIER_TABLE: [TierSpec; TIER_COUNT] = [
    TierSpec {
        name: "Qi Refining",
        threshold: 10,
        lifespan_bonus: 0,
    },
    TierSpec {
        name: "Foundation",
        threshold: 100,
        lifespan_bonus: 0,
    },
    TierSpec {
        name: "Core Formation",
        threshold: 1_000,
        lifespan_bonus: 800,
    },
    TierSpec {
        name: "Nascent Soul",
        threshold: 10_000,
        lifespan_bonus: 8_000,
    },
    TierSpec {
        name: "Spirit Severing",
        threshold: 100_000,
        lifespan_bonus: 80_000,
    },
    TierSpec {
        name: "Void Refining",
        threshold: 1_000_000,
        lifespan_bonus: 800_000,
    },
    TierSpec {
        name: "Integration",
        threshold: 10_000_000,
        lifespan_bonus: 8_000_000,
    },
    TierSpec {
        name: "Mahayana",
        threshold: 100_000_000,
        lifespan_bonus: 80_000_000,
    },
];

impl Tier {
    pub const ALL: [Tier; TIER_COUNT] = [
        Tier::QiRefining,
        Tier::Foundation,
        Tier::CoreFormation,
        Tier::NascentSoul,
        Tier::SpiritSevering,
        Tier::VoidRefining,
        Tier::Integration,
        Tier::Mahayana,
    ];

    pub const MAX: Tier = Tier::Mahayana;

    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn from_rank(rank: usize) -> Option<Tier> {
        Tier::ALL.get(rank).copied()
    }

    pub fn next(self) -> Option<Tier> {
        Tier::from_rank(self.rank() + 1)
    }

    pub fn spec(self) -> &'static TierSpec {
        &TIER_TABLE[self.rank()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn threshold(self) -> u64 {
        self.spec().threshold
    }

    pub fn lifespan_bonus(self) -> u64 {
        self.spec().lifespan_bonus
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
