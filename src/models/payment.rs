//! Payment model
//!
//! A direct reimbursement from one member to another, settling debt outside
//! of the even-split mechanism.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::RecordValidationError;
use super::ids::{GroupId, MemberId, PaymentId};
use super::money::Amount;

/// A transfer of `value` from `payer_id` to `target_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default = "empty_payment_id")]
    pub id: PaymentId,

    /// Member handing over the money
    pub payer_id: MemberId,

    /// Member receiving the money
    pub target_id: MemberId,

    pub value: Amount,

    #[serde(default = "empty_group_id")]
    pub group_id: GroupId,

    /// When the payment was recorded (RFC 3339 on the wire)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

fn empty_payment_id() -> PaymentId {
    PaymentId::from("")
}

fn empty_group_id() -> GroupId {
    GroupId::from("")
}

impl Payment {
    /// Create a new payment with a fresh id
    pub fn new(group_id: GroupId, payer_id: MemberId, target_id: MemberId, value: Amount) -> Self {
        Self {
            id: PaymentId::new(),
            payer_id,
            target_id,
            value,
            group_id,
            date: None,
        }
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
        if self.payer_id == self.target_id {
            return Err(RecordValidationError::SelfPayment);
        }
        Ok(())
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.payer_id, self.target_id, self.value)
    }
}
