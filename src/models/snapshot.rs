//! Ledger snapshot
//!
//! An immutable read of one group's members, expenses and payments at the
//! moment an analysis is requested. The engine only ever borrows it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::expense::{Expense, RecordValidationError};
use super::ids::{ExpenseId, GroupId, MemberId, PaymentId};
use super::payment::Payment;

/// One group's ledger at computation time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub group_id: GroupId,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub owner_id: Option<MemberId>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Current members
    #[serde(default)]
    pub members: BTreeSet<MemberId>,

    /// Members who have left; they take no share of expenses
    #[serde(default)]
    pub former_members: BTreeSet<MemberId>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl LedgerSnapshot {
    /// Create an empty snapshot for a group
    pub fn new(group_id: GroupId, name: impl Into<String>) -> Self {
        Self {
            group_id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add members (builder style)
    pub fn with_members<I, M>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberId>,
    {
        self.members.extend(members.into_iter().map(Into::into));
        self
    }

    /// Add an expense (builder style)
    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Add a payment (builder style)
    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payments.push(payment);
        self
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    pub fn is_former_member(&self, member: &MemberId) -> bool {
        self.former_members.contains(member)
    }

    /// Collect data-quality problems in the snapshot
    ///
    /// The balance engine accepts all of these; this exists so the
    /// surrounding tooling can surface them.
    pub fn validate(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        for expense in &self.expenses {
            if let Err(error) = expense.validate() {
                issues.push(SnapshotIssue::InvalidExpense {
                    id: expense.id.clone(),
                    error,
                });
            }
            if !self.is_member(&expense.payer_id) {
                issues.push(SnapshotIssue::NonMemberReference {
                    record: expense.id.to_string(),
                    member: expense.payer_id.clone(),
                });
            }
            if !expense.group_id.is_empty() && expense.group_id != self.group_id {
                issues.push(SnapshotIssue::ForeignGroup {
                    record: expense.id.to_string(),
                    group_id: expense.group_id.clone(),
                });
            }
        }

        for payment in &self.payments {
            if let Err(error) = payment.validate() {
                issues.push(SnapshotIssue::InvalidPayment {
                    id: payment.id.clone(),
                    error,
                });
            }
            for member in [&payment.payer_id, &payment.target_id] {
                if !self.is_member(member) {
                    issues.push(SnapshotIssue::NonMemberReference {
                        record: payment.id.to_string(),
                        member: member.clone(),
                    });
                }
            }
            if !payment.group_id.is_empty() && payment.group_id != self.group_id {
                issues.push(SnapshotIssue::ForeignGroup {
                    record: payment.id.to_string(),
                    group_id: payment.group_id.clone(),
                });
            }
        }

        issues
    }
}

/// A data-quality problem found by [`LedgerSnapshot::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotIssue {
    InvalidExpense {
        id: ExpenseId,
        error: RecordValidationError,
    },
    InvalidPayment {
        id: PaymentId,
        error: RecordValidationError,
    },
    /// A record names a member outside the current member set
    NonMemberReference { record: String, member: MemberId },
    /// A record carries another group's id
    ForeignGroup { record: String, group_id: GroupId },
}

impl fmt::Display for SnapshotIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidExpense { id, error } => write!(f, "expense {}: {}", id, error),
            Self::InvalidPayment { id, error } => write!(f, "payment {}: {}", id, error),
            Self::NonMemberReference { record, member } => {
                write!(f, "record {} references non-member {}", record, member)
            }
            Self::ForeignGroup { record, group_id } => {
                write!(f, "record {} belongs to group {}", record, group_id)
            }
        }
    }
}
