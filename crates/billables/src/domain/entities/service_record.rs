//! ServiceRecord - One billable engagement with a client
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::ServiceStatus;

/// Persisted shape of a service record.
///
/// `id` is `None` until the store assigns one on first save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: Option<i64>,
    pub client_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub price_agreed: Decimal,
    pub amount_paid: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    pub status: ServiceStatus,
}

impl ServiceRecord {
    /// Amount paid so far, treating an absent amount as zero
    pub fn paid(&self) -> Decimal {
        self.amount_paid.unwrap_or(Decimal::ZERO)
    }

    /// True once any positive amount has been recorded
    pub fn has_payment(&self) -> bool {
        self.paid() > Decimal::ZERO
    }
}

/// Caller-supplied record for create and update.
///
/// Every field a caller may leave out is optional; the reconciliation rules
/// decide what the stored record looks like.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRecordInput {
    pub id: Option<i64>,
    pub client_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub price_agreed: Decimal,
    pub amount_paid: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    pub status: Option<ServiceStatus>,
}

impl ServiceRecordInput {
    /// Reject inputs that can never become a valid record.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.client_name.trim().is_empty() {
            return Err(DomainError::validation("clientName must not be blank"));
        }
        if self.price_agreed < Decimal::ZERO {
            return Err(DomainError::validation("priceAgreed must not be negative"));
        }
        if let Some(paid) = self.amount_paid {
            if paid < Decimal::ZERO {
                return Err(DomainError::validation("amountPaid must not be negative"));
            }
        }
        Ok(())
    }
}
