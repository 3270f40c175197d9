//! YAML Export functionality
//!
//! Human-readable export of an analysis, with a comment header recording
//! what was exported and when.

use chrono::Utc;
use serde::Serialize;
use std::io::Write;

use crate::error::LedgerResult;

/// Write `report` as YAML preceded by a `#` header naming `title`
pub fn export_yaml<T, W>(report: &T, title: &str, mut writer: W) -> LedgerResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    writeln!(writer, "# splitledger export: {}", title)?;
    writeln!(writer, "# Generated: {}", Utc::now().to_rfc3339())?;
    writeln!(writer, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Expense, GroupId, LedgerSnapshot, MemberId};
    use crate::reports::GroupAnalysis;

    #[test]
    fn test_yaml_export() {
        let g = GroupId::from("g1");
        let snapshot = LedgerSnapshot::new(g.clone(), "Flat")
            .with_members(["ana", "bia"])
            .with_expense(Expense::new(g, MemberId::from("ana"), Amount::new(100.0), "rent"));
        let analysis = GroupAnalysis::build(&snapshot, &MemberId::from("ana"));

        let mut out = Vec::new();
        export_yaml(&analysis, "group Flat", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# splitledger export: group Flat\n"));
        assert!(text.contains("# Generated: "));
        assert!(text.contains("groupName: Flat"));
        assert!(text.contains("myBalance: 50.0"));
        assert!(text.contains("userId: bia"));

        let parsed: GroupAnalysis = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, analysis);
    }
}
