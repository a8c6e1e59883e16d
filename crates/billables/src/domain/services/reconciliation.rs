//! Payment Reconciliation Rules
//!
//! Derives `status` and `payment_date` from the payment fields of a record.
//! Every function takes `today` explicitly so callers control the clock.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::entities::{ServiceRecord, ServiceRecordInput};
use crate::domain::value_objects::ServiceStatus;

/// Build the record to store for a create.
///
/// - nothing paid and no payment date: `pending`
/// - a positive payment without a date: stamped with `today`, `completed`
/// - a caller-supplied payment date is kept as-is
///
/// Any id on the input is dropped; the store allocates a new one.
pub fn reconcile_insert(input: ServiceRecordInput, today: NaiveDate) -> ServiceRecord {
    let paid = input.amount_paid.unwrap_or(Decimal::ZERO) > Decimal::ZERO;

    let (status, payment_date) = match input.payment_date {
        None if !paid => (ServiceStatus::Pending, None),
        None => (ServiceStatus::Completed, Some(today)),
        Some(date) => {
            let status = match input.status {
                Some(ServiceStatus::Cancelled) => ServiceStatus::Cancelled,
                _ if paid => ServiceStatus::Completed,
                other => other.unwrap_or_default(),
            };
            (status, Some(date))
        }
    };

    ServiceRecord {
        id: None,
        client_name: input.client_name,
        start_date: input.start_date.unwrap_or(today),
        end_date: input.end_date.unwrap_or(today),
        description: input.description,
        price_agreed: input.price_agreed,
        amount_paid: input.amount_paid,
        payment_date,
        status,
    }
}

/// Build the record to store for an update of `existing`.
///
/// 1. A present incoming amount is adopted onto the loaded record.
/// 2. If the loaded record now carries a positive amount and was not
///    `completed`, the update is forced to `completed`, takes the loaded
///    amount and is stamped with `today`.
/// 3. If the incoming amount equals the agreed price, the update is
///    `completed` and stamped with `today`, whatever step 2 decided.
///
/// An omitted amount or payment date keeps the stored value.
pub fn reconcile_update(
    incoming: ServiceRecordInput,
    existing: ServiceRecord,
    today: NaiveDate,
) -> ServiceRecord {
    let mut working = existing;
    if let Some(amount) = incoming.amount_paid {
        working.amount_paid = Some(amount);
    }

    let mut record = ServiceRecord {
        id: working.id,
        client_name: incoming.client_name,
        start_date: incoming.start_date.unwrap_or(today),
        end_date: incoming.end_date.unwrap_or(today),
        description: incoming.description,
        price_agreed: incoming.price_agreed,
        amount_paid: incoming.amount_paid.or(working.amount_paid),
        payment_date: incoming.payment_date.or(working.payment_date),
        status: incoming.status.unwrap_or(working.status),
    };

    // Reads the loaded record, not the incoming one
    if working.has_payment() && working.status != ServiceStatus::Completed {
        record.status = ServiceStatus::Completed;
        record.amount_paid = working.amount_paid;
        record.payment_date = Some(today);
    }

    if record.amount_paid == Some(record.price_agreed) {
        record.status = ServiceStatus::Completed;
        record.payment_date = Some(today);
    }

    settle_paid_pending(record, today)
}

/// Build the record to store for an update whose id is not in the store.
///
/// The incoming record is kept as sent; only a missing status is inferred
/// from the amount.
pub fn reconcile_detached(incoming: ServiceRecordInput, today: NaiveDate) -> ServiceRecord {
    let status = incoming.status.unwrap_or_else(|| {
        if incoming.amount_paid.unwrap_or(Decimal::ZERO) > Decimal::ZERO {
            ServiceStatus::Completed
        } else {
            ServiceStatus::Pending
        }
    });

    let record = ServiceRecord {
        id: incoming.id,
        client_name: incoming.client_name,
        start_date: incoming.start_date.unwrap_or(today),
        end_date: incoming.end_date.unwrap_or(today),
        description: incoming.description,
        price_agreed: incoming.price_agreed,
        amount_paid: incoming.amount_paid,
        payment_date: incoming.payment_date,
        status,
    };

    settle_paid_pending(record, today)
}

/// Mark a record cancelled; payment fields are left untouched.
pub fn cancel(mut record: ServiceRecord) -> ServiceRecord {
    record.status = ServiceStatus::Cancelled;
    record
}

/// Put a record back to `pending` with its payment wiped.
pub fn reactivate(mut record: ServiceRecord) -> ServiceRecord {
    record.status = ServiceStatus::Pending;
    record.amount_paid = Some(Decimal::ZERO);
    record.payment_date = None;
    record
}

/// A positive amount and a `pending` status never reach the store together.
fn settle_paid_pending(mut record: ServiceRecord, today: NaiveDate) -> ServiceRecord {
    if record.has_payment() && record.status == ServiceStatus::Pending {
        record.status = ServiceStatus::Completed;
        record.payment_date.get_or_insert(today);
    }
    record
}
