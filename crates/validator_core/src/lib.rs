//! Validator core: pure record model, eligibility rules and run accounting.
mod outcome;
mod record;

pub use outcome::{Playability, RunSummary, Verdict};
pub use record::{is_eligible, Candidate, ValidationStatus};
