use std::sync::Once;

use validator_core::{is_eligible, Candidate, ValidationStatus};

static INIT: Once = Once::new();

fn setup() {
    INIT.call_once(validator_logging::initialize_for_tests);
}

#[test]
fn records_without_url_are_excluded() {
    setup();
    assert!(!is_eligible(None, None));
    assert!(!is_eligible(Some(""), None));
    assert!(!is_eligible(Some("   \t"), None));
}

#[test]
fn finalized_statuses_are_excluded() {
    setup();
    let url = Some("https://x.itch.io/game");
    assert!(!is_eligible(url, Some("Ready")));
    assert!(!is_eligible(url, Some("Invalid")));
}

#[test]
fn unset_or_other_statuses_qualify() {
    setup();
    let url = Some("https://x.itch.io/game");
    assert!(is_eligible(url, None));
    assert!(is_eligible(url, Some("Pending")));
    assert!(is_eligible(url, Some("")));
    // Exact, case-sensitive comparison: a differently-cased value is "other".
    assert!(is_eligible(url, Some("ready")));
}

#[test]
fn from_fields_keeps_qualifying_records_intact() {
    setup();
    let candidate =
        Candidate::from_fields("recA", Some("https://x.itch.io/game"), Some("Pending"))
            .expect("qualifying record");
    assert_eq!(candidate.id, "recA");
    assert_eq!(candidate.url, "https://x.itch.io/game");
    assert_eq!(candidate.current_status.as_deref(), Some("Pending"));

    let unset = Candidate::from_fields("recB", Some("https://y.itch.io/game"), None)
        .expect("record with no status");
    assert_eq!(unset.current_status, None);
}

#[test]
fn from_fields_rejects_non_candidates() {
    setup();
    assert_eq!(Candidate::from_fields("recA", None, None), None);
    assert_eq!(Candidate::from_fields("recB", Some(" "), Some("Pending")), None);
    assert_eq!(
        Candidate::from_fields("recC", Some("https://x.itch.io/game"), Some("Ready")),
        None
    );
}

#[test]
fn status_serializes_to_store_values() {
    setup();
    assert_eq!(ValidationStatus::Ready.as_str(), "Ready");
    assert_eq!(ValidationStatus::Invalid.as_str(), "Invalid");
    assert_eq!(ValidationStatus::Ready.to_string(), "Ready");
}
