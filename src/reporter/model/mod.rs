pub mod outcome;
pub mod test_report;

pub use outcome::{Outcome, Phase};
pub use test_report::{CollectedItem, TestReport};
