//! RecordFilter - Closed set of predicates the record store understands

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DateField, DateRange, ServiceStatus};
use crate::domain::entities::ServiceRecord;

/// Selection criteria for listings and range queries.
///
/// `matches` is the reference semantics; store adapters translate each
/// variant into their own query language and must agree with it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordFilter {
    All,
    /// Not cancelled and nothing paid yet
    Pending,
    Completed,
    Cancelled,
    DateRange { field: DateField, range: DateRange },
}

impl RecordFilter {
    pub fn date_range(field: DateField, range: DateRange) -> Self {
        Self::DateRange { field, range }
    }

    pub fn matches(&self, record: &ServiceRecord) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::Pending => {
                record.status != ServiceStatus::Cancelled
                    && record.amount_paid.map_or(true, |paid| paid == Decimal::ZERO)
            }
            RecordFilter::Completed => record.status == ServiceStatus::Completed,
            RecordFilter::Cancelled => record.status == ServiceStatus::Cancelled,
            RecordFilter::DateRange { field, range } => {
                let value = match field {
                    DateField::StartDate => Some(record.start_date),
                    DateField::EndDate => Some(record.end_date),
                    DateField::PaymentDate => record.payment_date,
                };
                value.is_some_and(|date| range.contains(date))
            }
        }
    }
}
