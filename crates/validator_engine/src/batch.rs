use std::time::Duration;

use validator_core::{RunSummary, Verdict};
use validator_logging::{validator_error, validator_info};

use crate::check::PlayabilityChecker;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Unconditional delay after each record, failed or not.
    pub pace: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            pace: Duration::from_secs(1),
        }
    }
}

/// Runs one full validation pass: list candidates, check each URL in order,
/// write the mapped status back, and report the tallies.
///
/// A failed candidate listing degrades to an empty work list; a failed
/// status write is logged and counted but never aborts the run. One record
/// is fully processed before the next begins.
pub async fn run_batch(
    store: &dyn RecordStore,
    checker: &dyn PlayabilityChecker,
    settings: &BatchSettings,
) -> RunSummary {
    let candidates = match store.list_candidates().await {
        Ok(list) => list,
        Err(err) => {
            validator_error!("Error fetching projects: {}", err);
            Vec::new()
        }
    };

    let mut summary = RunSummary::default();
    if candidates.is_empty() {
        validator_info!("No projects to validate");
        return summary;
    }

    for candidate in &candidates {
        validator_info!("Checking project {}: {}", candidate.id, candidate.url);

        let verdict = match checker.check(&candidate.url).await {
            Ok(playability) => {
                let verdict = Verdict::from(playability);
                if verdict == Verdict::NotPlayable {
                    validator_info!("Game not playable in browser: {}", candidate.url);
                }
                verdict
            }
            Err(err) => {
                validator_error!("Error checking {}: {}", candidate.url, err);
                Verdict::Unchecked
            }
        };

        match store.update_status(&candidate.id, verdict.status()).await {
            Ok(()) => summary.record(verdict),
            Err(err) => {
                validator_error!("Error updating record {}: {}", candidate.id, err);
                summary.record_write_failure();
            }
        }

        // Rate limiting - be nice to the game host.
        tokio::time::sleep(settings.pace).await;
    }

    validator_info!(
        "Validation complete. {} games set to 'Ready', {} games set to 'Invalid' \
         ({} unchecked, {} updates failed)",
        summary.ready,
        summary.invalid,
        summary.check_failures,
        summary.write_failures
    );
    summary
}
