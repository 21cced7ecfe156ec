use serde::{Deserialize, Serialize};

use crate::tier::{Tier, BASE_LIFESPAN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CultivatorId(u64);

impl CultivatorId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CultivatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cultivator {
    pub id: CultivatorId,
    pub age: u64,
    pub power: u64,
    pub tier: Tier,
    /// Risk tolerance in `[0, 1]`, fixed at creation.
    pub courage: f64,
    pub lifespan_cap: u64,
    pub alive: bool,
    pub defeats: u32,
    pub battles: u32,
    pub birth_year: u64,
}

impl Cultivator {
    /// A fresh tier-0 cultivator with the base lifespan.
    pub fn new(id: CultivatorId, age: u64, courage: f64) -> Self {
        Self {
            id,
            age,
            power: 0,
            tier: Tier::QiRefining,
            courage: courage.clamp(0.0, 1.0),
            lifespan_cap: BASE_LIFESPAN,
            alive: true,
            defeats: 0,
            battles: 0,
            birth_year: 0,
        }
    }

    /// Places the cultivator directly into `tier` with `power`, as recruits
    /// that qualified before being tracked.
    pub fn with_standing(mut self, tier: Tier, power: u64) -> Self {
        self.tier = tier;
        self.power = power;
        self
    }

    pub fn remaining_lifespan(&self) -> u64 {
        self.lifespan_cap.saturating_sub(self.age)
    }

    pub fn can_promote(&self) -> bool {
        match self.tier.next() {
            Some(next) => self.power >= next.threshold(),
            None => false,
        }
    }

    /// Advances one tier if eligible. Returns whether a promotion happened.
    pub fn promote(&mut self) -> bool {
        if !self.can_promote() {
            return false;
        }
        let Some(next) = self.tier.next() else {
            return false;
        };
        self.tier = next;
        self.lifespan_cap += next.lifespan_bonus();
        true
    }

    pub fn age_one_year(&mut self) {
        if !self.alive {
            return;
        }
        self.power += 1;
        self.age += 1;
        if self.age >= self.lifespan_cap {
            self.alive = false;
        }
        while self.can_promote() {
            self.promote();
        }
    }

    pub fn win_probability(&self, opponent: &Cultivator) -> f64 {
        let total = self.power + opponent.power;
        if total == 0 {
            return 0.5;
        }
        self.power as f64 / total as f64
    }

    /// Fights only when the chance of losing stays below courage.
    pub fn decides_to_fight(&self, opponent: &Cultivator) -> bool {
        self.courage > 1.0 - self.win_probability(opponent)
    }

    /// Takes `floor(defeated.power * rate)`. Marking `defeated` dead and
    /// counting its battle is the caller's job.
    pub fn absorb(&mut self, defeated: &Cultivator, rate: f64) {
        let gained = (defeated.power as f64 * rate).floor() as u64;
        self.power += gained;
        self.defeats += 1;
        self.battles += 1;
    }
}
