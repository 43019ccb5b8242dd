use std::io::BufReader;
use std::sync::Arc;

use tracing::debug;

use axaudit_tree::{DescriptorSource, NodeHandle, all_nodes};
use axaudit_types::{
    CHECK_ID_IMAGE_DESCRIPTOR, CheckResult, DescriptorId, NodeId, REASON_NO_DESCRIPTOR,
};

use crate::check::{AuditCheck, CheckFailure};
use crate::scanner::{LayoutEvent, LayoutScanner, ScanError};

const IMAGE_TAGS: &[&str] = &["image-view", "image-button"];
const ATTR_CONTENT_DESC: &str = "content-desc";
const ATTR_IMPORTANT: &str = "important-for-accessibility";

/// Image elements declared in a layout descriptor must carry a content
/// description unless they opt out of accessibility importance.
///
/// The declared attributes are not reconstructable from the live tree, so
/// this check scans the serialized descriptor the node originates from.
pub struct ImageDescriptorCheck {
    source: Arc<dyn DescriptorSource>,
}

enum ScanOnceError {
    Open(std::io::Error),
    Scan(ScanError),
}

impl ImageDescriptorCheck {
    pub fn new(source: Arc<dyn DescriptorSource>) -> Self {
        Self { source }
    }

    fn scan_once(&self, id: DescriptorId, subject: NodeId) -> Result<Vec<CheckResult>, ScanOnceError> {
        let reader = self.source.open(id).map_err(ScanOnceError::Open)?;
        let scanner = LayoutScanner::new(BufReader::new(reader));
        let mut results = Vec::new();

        for event in scanner {
            match event.map_err(ScanOnceError::Scan)? {
                LayoutEvent::StartTag { name, attributes } if IMAGE_TAGS.contains(&name.as_str()) => {
                    let described = attributes
                        .get(ATTR_CONTENT_DESC)
                        .is_some_and(|v| !v.is_empty());
                    // Absent-or-true: only an explicit "false" opts out.
                    let important = attributes
                        .get(ATTR_IMPORTANT)
                        .is_none_or(|v| v != "false");
                    if !described && important {
                        results.push(CheckResult::error(
                            CHECK_ID_IMAGE_DESCRIPTOR,
                            subject,
                            format!("descriptor tag '{name}' has no {ATTR_CONTENT_DESC} attribute"),
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(results)
    }

    /// One retry by re-opening the stream: the source is deterministic, so
    /// a second structural failure is surfaced.
    fn scan_with_retry(
        &self,
        id: DescriptorId,
        subject: NodeId,
    ) -> Result<Vec<CheckResult>, CheckFailure> {
        match self.scan_once(id, subject) {
            Ok(results) => Ok(results),
            Err(_) => {
                debug!(descriptor = id.0, "descriptor scan failed, retrying once");
                self.scan_once(id, subject).map_err(|e| match e {
                    ScanOnceError::Open(e) => CheckFailure::DescriptorOpen(id, e),
                    ScanOnceError::Scan(e) => CheckFailure::DescriptorScan(id, e),
                })
            }
        }
    }
}

impl AuditCheck for ImageDescriptorCheck {
    fn name(&self) -> &'static str {
        CHECK_ID_IMAGE_DESCRIPTOR
    }

    fn run(&self, root: &NodeHandle) -> Result<Vec<CheckResult>, CheckFailure> {
        let mut results = Vec::new();

        for node in all_nodes(root) {
            match node.layout_descriptor_id() {
                None => {
                    results.push(CheckResult::not_run(self.name(), node.id(), REASON_NO_DESCRIPTOR));
                }
                Some(id) => {
                    results.extend(self.scan_with_retry(id, node.id())?);
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axaudit_testkit::{FakeNode, FlakySource, MapDescriptorSource};
    use axaudit_types::Severity;

    fn run_with(descriptor: &str) -> Vec<CheckResult> {
        let source = MapDescriptorSource::new().with(7, descriptor);
        let check = ImageDescriptorCheck::new(Arc::new(source));
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).descriptor(7))
            .build();
        check.run(&root).unwrap()
    }

    fn errors(results: &[CheckResult]) -> usize {
        results.iter().filter(|r| r.severity == Severity::Error).count()
    }

    #[test]
    fn undescribed_image_view_is_an_error() {
        let results = run_with("<image-view/>");
        assert_eq!(errors(&results), 1);
    }

    #[test]
    fn image_opted_out_of_accessibility_passes() {
        let results = run_with(r#"<image-view important-for-accessibility="false"/>"#);
        assert_eq!(errors(&results), 0);
    }

    #[test]
    fn described_image_passes() {
        let results = run_with(r#"<image-button content-desc="send message"/>"#);
        assert_eq!(errors(&results), 0);
    }

    #[test]
    fn empty_content_desc_counts_as_missing() {
        let results = run_with(r#"<image-view content-desc=""/>"#);
        assert_eq!(errors(&results), 1);
    }

    #[test]
    fn non_image_tags_are_ignored() {
        let results = run_with("<frame><text-view/></frame>");
        assert_eq!(errors(&results), 0);
    }

    #[test]
    fn every_image_tag_is_checked() {
        let results =
            run_with(r#"<frame><image-view/><image-button/><image-view content-desc="x"/></frame>"#);
        assert_eq!(errors(&results), 2);
    }

    #[test]
    fn node_without_descriptor_is_not_run() {
        let source = MapDescriptorSource::new();
        let check = ImageDescriptorCheck::new(Arc::new(source));
        let root = FakeNode::new(1).build();

        let results = check.run(&root).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message, REASON_NO_DESCRIPTOR);
    }

    #[test]
    fn malformed_descriptor_is_a_structural_failure() {
        let source = MapDescriptorSource::new().with(7, "<image-view attr=unquoted/>");
        let check = ImageDescriptorCheck::new(Arc::new(source));
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).descriptor(7))
            .build();

        let failure = check.run(&root).unwrap_err();
        assert!(matches!(failure, CheckFailure::DescriptorScan(DescriptorId(7), _)));
    }

    #[test]
    fn transient_open_failure_is_retried_once() {
        let inner = MapDescriptorSource::new().with(7, "<image-view/>");
        let source = FlakySource::failing_first(inner, 1);
        let check = ImageDescriptorCheck::new(Arc::new(source));
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).descriptor(7))
            .build();

        let results = check.run(&root).unwrap();
        assert_eq!(errors(&results), 1);
    }

    #[test]
    fn persistent_open_failure_is_surfaced() {
        let inner = MapDescriptorSource::new().with(7, "<image-view/>");
        let source = FlakySource::failing_first(inner, 5);
        let check = ImageDescriptorCheck::new(Arc::new(source));
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).descriptor(7))
            .build();

        let failure = check.run(&root).unwrap_err();
        assert!(matches!(failure, CheckFailure::DescriptorOpen(DescriptorId(7), _)));
    }
}
