//! On-disk record shapes of a ledger export
//!
//! The export mirrors the persistence layer: every collection is a map keyed
//! by record id, and group membership is a map of member id to a flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Expense, GroupId, LedgerSnapshot, MemberId, Payment};

/// Top-level export document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerExport {
    #[serde(default)]
    pub groups: BTreeMap<String, GroupRecord>,
}

/// One group as stored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub owner_id: Option<MemberId>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// `false` marks a former member
    #[serde(default)]
    pub member_ids: BTreeMap<MemberId, bool>,

    #[serde(default)]
    pub expenses: BTreeMap<String, Expense>,

    #[serde(default)]
    pub payments: BTreeMap<String, Payment>,
}

impl GroupRecord {
    /// Convert into a snapshot, using `key` where the record carries no id
    pub fn into_snapshot(self, key: &str) -> LedgerSnapshot {
        let group_id = GroupId::from(fallback(self.id, key));

        let (current, former): (Vec<_>, Vec<_>) =
            self.member_ids.into_iter().partition(|(_, current)| *current);
        let members = current.into_iter().map(|(member, _)| member).collect();
        let former_members = former.into_iter().map(|(member, _)| member).collect();

        let mut expenses: Vec<Expense> = self
            .expenses
            .into_iter()
            .map(|(key, mut expense)| {
                if expense.id.is_empty() {
                    expense.id = key.into();
                }
                expense
            })
            .collect();
        expenses.sort_by(|a, b| a.id.cmp(&b.id));

        let mut payments: Vec<Payment> = self
            .payments
            .into_iter()
            .map(|(key, mut payment)| {
                if payment.id.is_empty() {
                    payment.id = key.into();
                }
                payment
            })
            .collect();
        payments.sort_by(|a, b| a.id.cmp(&b.id));

        LedgerSnapshot {
            group_id,
            name: self.name,
            description: self.description,
            owner_id: self.owner_id,
            created_at: self.created_at,
            members,
            former_members,
            expenses,
            payments,
        }
    }
}

fn fallback(id: String, key: &str) -> String {
    if id.trim().is_empty() {
        key.to_string()
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    const EXPORT: &str = r#"{
        "groups": {
            "g1": {
                "name": "Trip",
                "ownerId": "ana",
                "createdAt": "2024-03-01T12:00:00Z",
                "memberIds": { "ana": true, "bia": true, "caio": false },
                "expenses": {
                    "e2": { "payerId": "bia", "value": 30, "category": "fuel", "groupId": "g1" },
                    "e1": { "id": "e1", "payerId": "ana", "value": 90.5, "category": "food",
                            "groupId": "g1", "description": "dinner", "date": 1709294400000 }
                },
                "payments": {
                    "p1": { "payerId": "bia", "targetId": "ana", "value": 10,
                            "groupId": "g1", "date": "2024-03-02T09:30:00Z" }
                }
            },
            "g2": { "id": "g2", "name": "Empty" }
        }
    }"#;

    fn load() -> LedgerExport {
        serde_json::from_str(EXPORT).unwrap()
    }

    #[test]
    fn test_decode_group() {
        let mut export = load();
        let record = export.groups.remove("g1").unwrap();
        let snapshot = record.into_snapshot("g1");

        assert_eq!(snapshot.group_id.as_str(), "g1");
        assert_eq!(snapshot.name, "Trip");
        assert_eq!(snapshot.owner_id, Some(MemberId::from("ana")));
        assert!(snapshot.created_at.is_some());
        assert_eq!(snapshot.member_count(), 2);
        assert!(!snapshot.is_member(&MemberId::from("caio")));
        assert!(snapshot.is_former_member(&MemberId::from("caio")));
        assert!(!snapshot.is_former_member(&MemberId::from("ana")));
    }

    #[test]
    fn test_record_ids_fall_back_to_keys_and_sort() {
        let snapshot = load().groups.remove("g1").unwrap().into_snapshot("g1");

        let ids: Vec<&str> = snapshot.expenses.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
        assert_eq!(snapshot.expenses[0].value, Amount::new(90.5));
        assert_eq!(snapshot.expenses[0].description, "dinner");
        assert!(snapshot.expenses[0].date.is_some());
        assert_eq!(snapshot.payments[0].id.as_str(), "p1");
        assert!(snapshot.payments[0].date.is_some());
    }

    #[test]
    fn test_missing_collections_decode_empty() {
        let snapshot = load().groups.remove("g2").unwrap().into_snapshot("g2");

        assert!(snapshot.members.is_empty());
        assert!(snapshot.expenses.is_empty());
        assert!(snapshot.payments.is_empty());
    }

    #[test]
    fn test_float_expense_dates_decode() {
        let record: GroupRecord = serde_json::from_str(
            r#"{
                "memberIds": { "ana": true },
                "expenses": {
                    "e1": { "payerId": "ana", "value": 10, "date": 1709294400000.0 },
                    "e2": { "payerId": "ana", "value": 20, "date": 1709294400000 },
                    "e3": { "payerId": "ana", "value": 30, "date": null }
                }
            }"#,
        )
        .unwrap();
        let snapshot = record.into_snapshot("g");

        let expected = DateTime::from_timestamp_millis(1_709_294_400_000);
        assert_eq!(snapshot.expenses[0].date, expected);
        assert_eq!(snapshot.expenses[1].date, expected);
        assert!(snapshot.expenses[2].date.is_none());
    }

    #[test]
    fn test_empty_document() {
        let export: LedgerExport = serde_json::from_str("{}").unwrap();
        assert!(export.groups.is_empty());
    }
}
