use std::fmt;

/// Status values this system writes back to the record store.
///
/// The store field itself is open-ended; these are the only two values the
/// validator ever produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// The submitted page embeds a browser-playable build.
    Ready,
    /// No embedded build was found, or the page could not be checked.
    Invalid,
}

impl ValidationStatus {
    /// The exact string written into the store's status field.
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Ready => "Ready",
            ValidationStatus::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record eligible for validation in the current run.
///
/// Owned by the external store; this system only reads it and later writes
/// one status field back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Opaque record identifier assigned by the store.
    pub id: String,
    /// The submitted gameplay URL.
    pub url: String,
    /// Whatever status the record carried when it was read, if any.
    pub current_status: Option<String>,
}

impl Candidate {
    /// Builds a candidate from raw record fields, or `None` when the record
    /// does not qualify for validation.
    pub fn from_fields(id: &str, url: Option<&str>, status: Option<&str>) -> Option<Self> {
        if !is_eligible(url, status) {
            return None;
        }
        Some(Self {
            id: id.to_owned(),
            url: url?.to_owned(),
            current_status: status.map(ToOwned::to_owned),
        })
    }
}

/// A record qualifies while it has a usable URL and its status has not
/// already been finalized to `Ready` or `Invalid`.
///
/// The comparison is exact and case-sensitive; any other status value
/// (including none at all) leaves the record eligible.
pub fn is_eligible(url: Option<&str>, status: Option<&str>) -> bool {
    let has_url = url.is_some_and(|u| !u.trim().is_empty());
    let finalized = matches!(status, Some("Ready") | Some("Invalid"));
    has_url && !finalized
}
