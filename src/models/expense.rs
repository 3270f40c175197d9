//! Expense model
//!
//! An expense is one member fronting an amount that the whole group shares
//! evenly, payer included.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, GroupId, MemberId};
use super::money::Amount;

/// A shared expense paid by one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    #[serde(default = "empty_expense_id")]
    pub id: ExpenseId,

    /// Member who fronted the money
    pub payer_id: MemberId,

    /// Amount paid (non-negative)
    pub value: Amount,

    /// Free-text spending category
    #[serde(default)]
    pub category: String,

    /// Group the expense belongs to
    #[serde(default = "empty_group_id")]
    pub group_id: GroupId,

    #[serde(default)]
    pub description: String,

    /// When the expense happened (epoch milliseconds on the wire, integer or float)
    #[serde(
        default,
        with = "epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
}

/// Epoch-millisecond dates that may arrive as either integers or floats
mod epoch_millis {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Int(i64),
        Float(f64),
    }

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        chrono::serde::ts_milliseconds_option::serialize(date, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = match Option::<Millis>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(Millis::Int(ms)) => ms,
            Some(Millis::Float(ms)) if ms.is_finite() => ms.round() as i64,
            Some(Millis::Float(ms)) => {
                return Err(D::Error::custom(format!("invalid timestamp: {}", ms)))
            }
        };

        DateTime::from_timestamp_millis(millis)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", millis)))
    }
}

fn empty_expense_id() -> ExpenseId {
    ExpenseId::from("")
}

fn empty_group_id() -> GroupId {
    GroupId::from("")
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(
        group_id: GroupId,
        payer_id: MemberId,
        value: Amount,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            payer_id,
            value,
            category: category.into(),
            group_id,
            description: String::new(),
            date: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Validate the record's own fields
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if !self.value.is_finite() {
            return Err(RecordValidationError::NonFiniteValue);
        }
        if self.value.is_negative() {
            return Err(RecordValidationError::NegativeValue(self.value));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} paid {} [{}]", self.payer_id, self.value, self.category)?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}

/// Field-level problems shared by expenses and payments
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    NegativeValue(Amount),
    NonFiniteValue,
    SelfPayment,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeValue(value) => write!(f, "value must not be negative (got {})", value),
            Self::NonFiniteValue => write!(f, "value is not a finite number"),
            Self::SelfPayment => write!(f, "payer and target are the same member"),
        }
    }
}

impl std::error::Error for RecordValidationError {}
