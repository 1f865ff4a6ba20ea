use crate::ValidationStatus;

/// What a completed playability probe concluded about a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playability {
    /// The page embeds a browser-playable build.
    Playable,
    /// The page loaded but carries no embedded build marker.
    NotPlayable,
}

/// Per-record outcome as the batch runner sees it, including the case where
/// the probe itself failed.
///
/// The store only understands two status values, so `Unchecked` still
/// collapses to [`ValidationStatus::Invalid`] on write; keeping it distinct
/// here lets the run report how many "Invalid" records were actually
/// unreachable rather than confirmed not playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Confirmed playable.
    Playable,
    /// Confirmed not playable in the browser.
    NotPlayable,
    /// The check did not complete (bad URL, network failure, bad payload).
    Unchecked,
}

impl Verdict {
    /// The status value written back to the store for this verdict.
    pub fn status(self) -> ValidationStatus {
        match self {
            Verdict::Playable => ValidationStatus::Ready,
            Verdict::NotPlayable | Verdict::Unchecked => ValidationStatus::Invalid,
        }
    }
}

impl From<Playability> for Verdict {
    fn from(playability: Playability) -> Self {
        match playability {
            Playability::Playable => Verdict::Playable,
            Playability::NotPlayable => Verdict::NotPlayable,
        }
    }
}

/// Tallies for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records whose status was set to `Ready`.
    pub ready: usize,
    /// Records whose status was set to `Invalid`.
    pub invalid: usize,
    /// Subset of `invalid` that failed to check rather than being confirmed
    /// not playable.
    pub check_failures: usize,
    /// Records whose status write failed; counted in neither outcome bucket.
    pub write_failures: usize,
}

impl RunSummary {
    /// Tallies a record whose status write succeeded.
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Playable => self.ready += 1,
            Verdict::NotPlayable => self.invalid += 1,
            Verdict::Unchecked => {
                self.invalid += 1;
                self.check_failures += 1;
            }
        }
    }

    /// Tallies a record whose status write failed.
    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }

    /// Total records whose status was actually written this run.
    pub fn total_written(&self) -> usize {
        self.ready + self.invalid
    }
}
