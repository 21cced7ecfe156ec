use crate::cultivator::{Cultivator, CultivatorId};
use crate::stats::YearStatistics;

/// Battle and death tallies for the year in progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct YearLedger {
    pub battles: u64,
    pub deaths: u64,
}

/// Everything the simulation owns: every cultivator ever admitted (dead ones
/// included, in id order), the clock, and the yearly statistics history.
pub struct World {
    next_id: u64,
    year: u64,
    pub(crate) cultivators: Vec<Cultivator>,
    pub(crate) ledger: YearLedger,
    pub(crate) history: Vec<YearStatistics>,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            year: 0,
            cultivators: Vec::new(),
            ledger: YearLedger::default(),
            history: Vec::new(),
        }
    }

    pub fn year(&self) -> u64 {
        self.year
    }

    pub(crate) fn advance_time(&mut self) {
        self.year += 1;
        self.ledger = YearLedger::default();
    }

    /// Allocates the next id and appends whatever `build` makes of it.
    pub fn admit(&mut self, build: impl FnOnce(CultivatorId) -> Cultivator) -> CultivatorId {
        let id = self.allocate();
        let cultivator = build(id);
        debug_assert_eq!(cultivator.id, id, "admitted cultivator must keep its id");
        self.cultivators.push(cultivator);
        id
    }

    pub fn cultivators(&self) -> &[Cultivator] {
        &self.cultivators
    }

    pub fn cultivator(&self, id: CultivatorId) -> Option<&Cultivator> {
        self.position(id).map(|index| &self.cultivators[index])
    }

    pub fn cultivator_mut(&mut self, id: CultivatorId) -> Option<&mut Cultivator> {
        self.position(id).map(move |index| &mut self.cultivators[index])
    }

    pub fn alive(&self) -> impl Iterator<Item = &Cultivator> {
        self.cultivators.iter().filter(|c| c.alive)
    }

    pub fn alive_count(&self) -> u64 {
        self.alive().count() as u64
    }

    pub fn ledger(&self) -> YearLedger {
        self.ledger
    }

    pub fn history(&self) -> &[YearStatistics] {
        &self.history
    }

    pub fn latest(&self) -> Option<&YearStatistics> {
        self.history.last()
    }

    /// Owned copy of every cultivator at call time.
    pub fn roster(&self) -> Vec<Cultivator> {
        self.cultivators.clone()
    }

    fn position(&self, id: CultivatorId) -> Option<usize> {
        self.cultivators.binary_search_by_key(&id, |c| c.id).ok()
    }

    fn allocate(&mut self) -> CultivatorId {
        let id = CultivatorId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
