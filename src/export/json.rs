//! JSON Export functionality
//!
//! Analyses serialize with the field names the front end reads, so the
//! output can be handed to it unchanged.

use serde::Serialize;
use std::io::Write;

use crate::error::LedgerResult;

/// Write `report` as JSON, pretty-printed unless `compact` is set
pub fn export_json<T, W>(report: &T, mut writer: W, compact: bool) -> LedgerResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    if compact {
        serde_json::to_writer(&mut writer, report)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, report)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Expense, GroupId, LedgerSnapshot, MemberId};
    use crate::reports::{AggregateAnalysis, GroupAnalysis};

    fn analysis() -> GroupAnalysis {
        let g = GroupId::from("g1");
        let snapshot = LedgerSnapshot::new(g.clone(), "Flat")
            .with_members(["ana", "bia"])
            .with_expense(Expense::new(g, MemberId::from("ana"), Amount::new(100.0), "rent"));
        GroupAnalysis::build(&snapshot, &MemberId::from("bia"))
    }

    #[test]
    fn test_pretty_export() {
        let mut out = Vec::new();
        export_json(&analysis(), &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("\n  \"groupId\": \"g1\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["myBalance"], -50.0);
        assert_eq!(value["oweTo"][0]["userId"], "ana");
        assert_eq!(value["oweTo"][0]["amount"], 50.0);
    }

    #[test]
    fn test_compact_export_is_one_line() {
        let aggregate = AggregateAnalysis::build(&[analysis()]);
        let mut out = Vec::new();
        export_json(&aggregate, &mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"totalOwedByMe\":50.0"));
    }

    #[test]
    fn test_export_reads_back() {
        let original = analysis();
        let mut out = Vec::new();
        export_json(&original, &mut out, false).unwrap();

        let parsed: GroupAnalysis = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, original);
    }
}
