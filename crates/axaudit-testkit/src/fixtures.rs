//! Common descriptor documents used across the workspace tests.

/// An image element with neither a content description nor an
/// accessibility-importance opt-out: one expected defect.
pub const UNDESCRIBED_IMAGE: &str = r#"<frame><image-view width="24"/></frame>"#;

/// An image element explicitly opted out of accessibility importance.
pub const OPTED_OUT_IMAGE: &str =
    r#"<frame><image-view important-for-accessibility="false"/></frame>"#;

/// A fully described image element.
pub const DESCRIBED_IMAGE: &str = r#"<frame><image-button content-desc="send"/></frame>"#;

/// A descriptor that fails mid-tag: open quote never closed.
pub const TRUNCATED_DESCRIPTOR: &str = r#"<frame><image-view content-desc="oops"#;
