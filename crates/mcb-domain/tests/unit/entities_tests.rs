//! Entity invariants: Job state machine (§4.6), Library/Version
//! normalization, Document hierarchy helpers.

use mcb_domain::entities::{Document, DocumentMetadata, JobStatus, Library, Version};
use mcb_domain::value_objects::{DocumentId, LibraryId, Section, VersionId};

#[test]
fn job_status_terminal_and_active_classification() {
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
    assert!(JobStatus::Cancelled.is_terminal());
    assert!(!JobStatus::Queued.is_terminal());
    assert!(!JobStatus::Cancelling.is_terminal());

    assert!(JobStatus::Queued.is_active());
    assert!(JobStatus::Running.is_active());
    assert!(JobStatus::Cancelling.is_active());
    assert!(!JobStatus::Completed.is_active());
}

#[test]
fn job_status_allowed_transitions_match_state_machine() {
    assert!(JobStatus::Queued.can_transition_to(JobStatus::Running));
    assert!(JobStatus::Queued.can_transition_to(JobStatus::Cancelled));
    assert!(JobStatus::Running.can_transition_to(JobStatus::Completed));
    assert!(JobStatus::Running.can_transition_to(JobStatus::Failed));
    assert!(JobStatus::Running.can_transition_to(JobStatus::Cancelling));
    assert!(JobStatus::Cancelling.can_transition_to(JobStatus::Cancelled));
    assert!(JobStatus::Failed.can_transition_to(JobStatus::Queued));
    assert!(JobStatus::Cancelled.can_transition_to(JobStatus::Queued));
}

#[test]
fn job_status_rejects_illegal_transitions() {
    assert!(!JobStatus::Completed.can_transition_to(JobStatus::Running));
    assert!(!JobStatus::Queued.can_transition_to(JobStatus::Failed));
    assert!(!JobStatus::Cancelling.can_transition_to(JobStatus::Running));
}

#[test]
fn library_name_normalization_lowercases_and_trims() {
    assert_eq!(Library::normalize_name("  React  "), "react");
    assert_eq!(Library::normalize_name("REACT"), "react");
}

#[test]
fn version_name_normalization_defaults_to_unversioned() {
    assert_eq!(Version::normalize_name(None), Version::UNVERSIONED);
    assert_eq!(Version::normalize_name(Some("  ")), Version::UNVERSIONED);
    assert_eq!(Version::normalize_name(Some("V18.2.0")), "v18.2.0");
}

#[test]
fn document_path_and_level_delegate_to_section() {
    let doc = Document {
        id: DocumentId::new(1),
        library_id: LibraryId::from_name("react"),
        version_id: VersionId::from_name("react:18.2.0"),
        url: "https://example.com/guide".to_owned(),
        content: "content".to_owned(),
        metadata: DocumentMetadata {
            title: Some("Guide".to_owned()),
            url: "https://example.com/guide".to_owned(),
            section: Section {
                path: vec!["Guide".to_owned(), "Installation".to_owned()],
                level: 2,
            },
            mime_type: None,
        },
        sort_order: 0,
        indexed_at: 0,
    };

    assert_eq!(doc.path(), ["Guide", "Installation"]);
    assert_eq!(doc.level(), 2);
}
