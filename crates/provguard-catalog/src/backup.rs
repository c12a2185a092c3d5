//! Backup-plan tagging.
//!
//! Backups are opted into per resource by recording a plan name in the
//! attribute overlay; downstream tooling picks the tag up from the
//! manifest. This is a tag, not a rule: nothing validates it.

use provguard_core::{Attributes, ConfigError};

pub const ATTR_BACKUP_PLAN: &str = "backup.plan";

/// Available backup plans. Availability depends on the organization's
/// agreement with the backup provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackupPlan {
    Standard,
    CrossRegionStockholm,
    CrossRegionIreland,
    CrossRegionFrankfurt,
}

impl BackupPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupPlan::Standard => "Standard",
            BackupPlan::CrossRegionStockholm => "StandardCrossRegionStockholm",
            BackupPlan::CrossRegionIreland => "StandardCrossRegionIreland",
            BackupPlan::CrossRegionFrankfurt => "StandardCrossRegionFrankfurt",
        }
    }
}

/// Tag a resource's overlay to enable the standard backup plan (or a
/// cross-region variant). Applies to stateful kinds; tagging anything else
/// is harmless.
pub fn enable_backups(attributes: &Attributes, plan: BackupPlan) -> Result<(), ConfigError> {
    attributes.set(ATTR_BACKUP_PLAN, Some(plan.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Table, TableProps};
    use provguard_core::{EnforcementPolicy, Tree, synthesize};

    #[test]
    fn backup_tag_lands_in_the_manifest() {
        let tree = Tree::new();
        let table = Table::new(&tree.root(), "table", TableProps::default()).unwrap();
        enable_backups(table.attributes(), BackupPlan::CrossRegionStockholm).unwrap();

        let manifest = synthesize(&tree, &EnforcementPolicy::default()).unwrap();
        assert_eq!(
            manifest.resources[0].attributes.get(ATTR_BACKUP_PLAN),
            Some(&"StandardCrossRegionStockholm".to_string())
        );
    }
}
