//! Validator engine: playability probes, record store access and batch runs.
mod batch;
mod check;
mod decode;
mod store;
mod types;

pub use batch::{run_batch, BatchSettings};
pub use check::{CheckSettings, ItchChecker, PlayabilityChecker};
pub use decode::{decode_html, DecodeError};
pub use store::{
    AirtableStore, RecordStore, AIRTABLE_ENDPOINT, PROJECTS_TABLE, VALIDATION_VIEW,
};
pub use types::{CheckError, CheckFailure, StoreError};
