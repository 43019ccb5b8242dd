use axaudit_tree::{NodeHandle, all_nodes};
use axaudit_types::{
    CHECK_ID_TOUCH_TARGET, CheckResult, REASON_NO_BOUNDS, REASON_NO_DENSITY, REASON_NOT_CLICKABLE,
};

use crate::check::{AuditCheck, CheckFailure};

/// Minimum touch-target extent, in density-independent units.
pub const TOUCH_TARGET_MIN_DIP: i32 = 48;

/// Interactive nodes must present a touch target of at least 48x48dip.
#[derive(Debug, Default)]
pub struct TouchTargetCheck;

impl AuditCheck for TouchTargetCheck {
    fn name(&self) -> &'static str {
        CHECK_ID_TOUCH_TARGET
    }

    fn run(&self, root: &NodeHandle) -> Result<Vec<CheckResult>, CheckFailure> {
        let mut results = Vec::new();

        for node in all_nodes(root) {
            if !(node.is_clickable() || node.is_long_clickable()) {
                results.push(CheckResult::not_run(self.name(), node.id(), REASON_NOT_CLICKABLE));
                continue;
            }
            let Some(density) = node.display_density().filter(|d| *d > 0.0) else {
                results.push(CheckResult::not_run(self.name(), node.id(), REASON_NO_DENSITY));
                continue;
            };
            let Some(bounds) = node.bounds_px() else {
                results.push(CheckResult::not_run(self.name(), node.id(), REASON_NO_BOUNDS));
                continue;
            };

            let width = (bounds.width() / density) as i32;
            let height = (bounds.height() / density) as i32;
            let narrow = width < TOUCH_TARGET_MIN_DIP;
            let short = height < TOUCH_TARGET_MIN_DIP;

            let message = match (narrow, short) {
                (true, true) => format!(
                    "touch target width and height are below the minimum of \
                     {TOUCH_TARGET_MIN_DIP}x{TOUCH_TARGET_MIN_DIP}dip; actual size is {width}x{height}dip"
                ),
                (true, false) => format!(
                    "touch target width is below the minimum of {TOUCH_TARGET_MIN_DIP}dip; \
                     actual width is {width}dip"
                ),
                (false, true) => format!(
                    "touch target height is below the minimum of {TOUCH_TARGET_MIN_DIP}dip; \
                     actual height is {height}dip"
                ),
                (false, false) => continue,
            };
            results.push(CheckResult::error(self.name(), node.id(), message));
        }

        Ok(results)
    }
}
