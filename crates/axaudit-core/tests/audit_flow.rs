//! End-to-end audit flows over fake host trees.

use std::sync::Arc;

use axaudit_core::AuditSession;
use axaudit_store::MemoryTable;
use axaudit_testkit::{FakeNode, MapDescriptorSource, fixtures};
use axaudit_types::{
    CHECK_ID_ABBREVIATION, CHECK_ID_IMAGE_DESCRIPTOR, CHECK_ID_TOUCH_TARGET, Severity,
};

fn session_with(source: MapDescriptorSource) -> AuditSession {
    AuditSession::new(Arc::new(MemoryTable::new()), Arc::new(source))
}

#[test]
fn audit_with_no_defects_counts_only_not_run() {
    let session = session_with(MapDescriptorSource::new());
    let root = FakeNode::new(1).build();

    let run = session.run(&root);
    assert_eq!(run.counts.error, 0);
    assert_eq!(run.counts.warning, 0);
    assert!(run.counts.not_run > 0);
    assert_eq!(run.failed_checks().count(), 0);
}

#[test]
fn defective_tree_yields_expected_findings() {
    let source = MapDescriptorSource::new().with(10, fixtures::UNDESCRIBED_IMAGE);
    let session = session_with(source);

    let root = FakeNode::new(1)
        // Abbreviated text with no accessible label.
        .child(FakeNode::new(2).text_carrier("mr Dupont").text_size(16.0))
        // Undersized touch target.
        .child(
            FakeNode::new(3)
                .clickable()
                .bounds(0.0, 0.0, 40.0, 40.0)
                .density(1.0),
        )
        // Container declared from an undescribed image layout.
        .child(FakeNode::new(4).descriptor(10))
        .build();

    let run = session.run(&root);
    assert_eq!(run.failed_checks().count(), 0);

    let error_checks: Vec<&str> = run
        .results()
        .filter(|r| r.severity == Severity::Error)
        .map(|r| r.check_id.as_str())
        .collect();
    assert!(error_checks.contains(&CHECK_ID_ABBREVIATION));
    assert!(error_checks.contains(&CHECK_ID_TOUCH_TARGET));
    assert!(error_checks.contains(&CHECK_ID_IMAGE_DESCRIPTOR));
    assert_eq!(run.counts.error, 3);
}

#[test]
fn structural_failure_in_one_check_does_not_abort_siblings() {
    let source = MapDescriptorSource::new().with(10, fixtures::TRUNCATED_DESCRIPTOR);
    let session = session_with(source);

    let root = FakeNode::new(1)
        .child(FakeNode::new(2).descriptor(10))
        .child(FakeNode::new(3).text_carrier("mr Dupont"))
        .build();

    let run = session.run(&root);

    let failed: Vec<&str> = run.failed_checks().map(|o| o.check).collect();
    assert_eq!(failed, vec![CHECK_ID_IMAGE_DESCRIPTOR]);

    // The abbreviation defect is still reported.
    assert!(
        run.results()
            .any(|r| r.check_id == CHECK_ID_ABBREVIATION && r.severity == Severity::Error)
    );
}

#[test]
fn session_with_on_disk_store_persists_the_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abbreviation.db");

    let root = FakeNode::new(1)
        .child(FakeNode::new(2).text_carrier("mr Dupont"))
        .build();

    {
        let session =
            AuditSession::with_store_path(&path, Arc::new(MapDescriptorSource::new())).unwrap();
        let run = session.run(&root);
        assert_eq!(run.counts.error, 1);
    }

    // Second session reuses the seeded rows.
    let table = axaudit_store::SqliteTable::open(&path).unwrap();
    let entries = axaudit_store::AbbreviationTable::get_all(&table).unwrap();
    assert!(!entries.is_empty());
}
