use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use axaudit_domain::{
    AbbreviationCheck, AuditCheck, ContainerStateCheck, ControlLabelCheck, EditableLabelCheck,
    EmbeddedScriptCheck, ImageDescriptorCheck, TextSizeCheck, TouchTargetCheck,
};
use axaudit_store::{AbbreviationTable, SqliteTable};
use axaudit_tree::{DescriptorSource, NodeHandle};

use crate::runner::{AuditRun, run_audit};

/// The standard rule set, wired to the caller-supplied store and
/// descriptor source.
pub fn default_checks(
    table: Arc<dyn AbbreviationTable>,
    source: Arc<dyn DescriptorSource>,
) -> Vec<Box<dyn AuditCheck>> {
    vec![
        Box::new(ControlLabelCheck),
        Box::new(EditableLabelCheck),
        Box::new(TextSizeCheck),
        Box::new(EmbeddedScriptCheck),
        Box::new(AbbreviationCheck::new(table)),
        Box::new(ImageDescriptorCheck::new(source)),
        Box::new(ContainerStateCheck),
        Box::new(TouchTargetCheck),
    ]
}

/// One audit session: owns the check set and the store lifecycle.
///
/// Open at session start, drop at session end; the same session may audit
/// any number of roots.
pub struct AuditSession {
    checks: Vec<Box<dyn AuditCheck>>,
}

impl AuditSession {
    pub fn new(table: Arc<dyn AbbreviationTable>, source: Arc<dyn DescriptorSource>) -> Self {
        Self {
            checks: default_checks(table, source),
        }
    }

    /// Session backed by an on-disk abbreviation store.
    pub fn with_store_path(
        path: &Path,
        source: Arc<dyn DescriptorSource>,
    ) -> Result<Self, anyhow::Error> {
        let table = SqliteTable::open(path)
            .with_context(|| format!("opening abbreviation store at {}", path.display()))?;
        Ok(Self::new(Arc::new(table), source))
    }

    pub fn run(&self, root: &NodeHandle) -> AuditRun {
        run_audit(root, &self.checks)
    }
}
