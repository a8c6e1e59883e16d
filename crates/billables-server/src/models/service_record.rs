//! Service record DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use billables::{
    DateRange, DomainError, Page, PageRequest, ServiceRecord, ServiceRecordInput, ServiceStatus,
    Sort,
};

use crate::config::ServerConfig;

// ============================================
// Request DTOs
// ============================================

/// Service record as sent by clients on create and update
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordRequest {
    /// Required on update, ignored on create
    pub id: Option<i64>,
    pub client_name: String,
    /// Defaults to today
    pub start_date: Option<NaiveDate>,
    /// Defaults to today
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    pub price_agreed: Decimal,
    pub amount_paid: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "pending")]
    pub status: Option<ServiceStatus>,
}

impl From<ServiceRecordRequest> for ServiceRecordInput {
    fn from(req: ServiceRecordRequest) -> Self {
        Self {
            id: req.id,
            client_name: req.client_name,
            start_date: req.start_date,
            end_date: req.end_date,
            description: req.description,
            price_agreed: req.price_agreed,
            amount_paid: req.amount_paid,
            payment_date: req.payment_date,
            status: req.status,
        }
    }
}

/// Paging parameters (`sort` is `field[,asc|desc]`)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number
    pub page: Option<u32>,
    /// Page size, clamped to the server maximum
    pub size: Option<u32>,
    /// e.g. `startDate,desc`
    pub sort: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self, config: &ServerConfig) -> Result<PageRequest, DomainError> {
        let sort = match self.sort.as_deref() {
            Some(raw) => Sort::parse(raw)?,
            None => Sort::default(),
        };
        Ok(PageRequest::new(
            self.page.unwrap_or(0),
            config.page_size(self.size),
            sort,
        ))
    }
}

/// Inclusive date bounds, `YYYY-MM-DD`
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRangeQuery {
    pub fn to_range(&self) -> Result<DateRange, DomainError> {
        DateRange::new(self.start_date, self.end_date)
    }
}

// ============================================
// Response DTOs
// ============================================

/// Stored service record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordResponse {
    pub id: i64,
    pub client_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub price_agreed: Decimal,
    pub amount_paid: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    #[schema(value_type = String, example = "completed")]
    pub status: ServiceStatus,
}

impl TryFrom<ServiceRecord> for ServiceRecordResponse {
    type Error = DomainError;

    fn try_from(record: ServiceRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or_else(|| {
            DomainError::Repository("store returned a service record without an id".to_string())
        })?;
        Ok(Self {
            id,
            client_name: record.client_name,
            start_date: record.start_date,
            end_date: record.end_date,
            description: record.description,
            price_agreed: record.price_agreed,
            amount_paid: record.amount_paid,
            payment_date: record.payment_date,
            status: record.status,
        })
    }
}

/// Convert a list of stored records for the wire
pub fn to_responses(
    records: Vec<ServiceRecord>,
) -> Result<Vec<ServiceRecordResponse>, DomainError> {
    records.into_iter().map(ServiceRecordResponse::try_from).collect()
}

/// One page of service records
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordPage {
    pub content: Vec<ServiceRecordResponse>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based page number
    pub number: u32,
    pub size: u32,
}

impl TryFrom<Page<ServiceRecord>> for ServiceRecordPage {
    type Error = DomainError;

    fn try_from(page: Page<ServiceRecord>) -> Result<Self, Self::Error> {
        Ok(Self {
            content: to_responses(page.content)?,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            number: page.number,
            size: page.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let config = ServerConfig::default();
        let request = PageQuery::default().to_request(&config).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, config.default_page_size);
        assert_eq!(request.sort, Sort::default());
    }

    #[test]
    fn test_page_query_rejects_bad_sort() {
        let query = PageQuery {
            sort: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(query.to_request(&ServerConfig::default()).is_err());
    }

    fn record(id: Option<i64>) -> ServiceRecord {
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        ServiceRecord {
            id,
            client_name: "Alice".to_string(),
            start_date: day,
            end_date: day,
            description: String::new(),
            price_agreed: Decimal::new(100, 0),
            amount_paid: None,
            payment_date: None,
            status: ServiceStatus::Pending,
        }
    }

    #[test]
    fn test_response_requires_stored_id() {
        let response = ServiceRecordResponse::try_from(record(Some(3))).unwrap();
        assert_eq!(response.id, 3);

        let err = ServiceRecordResponse::try_from(record(None)).unwrap_err();
        assert!(matches!(err, DomainError::Repository(_)));
    }

    #[test]
    fn test_page_with_unsaved_record_is_rejected() {
        let request = PageRequest::of(0, 20);
        let page = Page::new(vec![record(Some(1)), record(None)], 2, &request);
        assert!(ServiceRecordPage::try_from(page).is_err());
    }

    #[test]
    fn test_date_range_query_rejects_reversed_bounds() {
        let query = DateRangeQuery {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(matches!(query.to_range(), Err(DomainError::Validation(_))));
    }
}
