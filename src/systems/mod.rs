mod aging;
pub mod combat;
pub mod recruitment;
mod statistics;

pub use aging::AgingSystem;
pub use combat::{CombatOutcome, CombatSystem};
pub use recruitment::RecruitmentSystem;
pub use statistics::StatisticsSystem;
