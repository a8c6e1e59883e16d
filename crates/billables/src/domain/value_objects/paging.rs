//! Paging - Page requests, sort orders and result pages

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Sortable columns of a service record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    ClientName,
    StartDate,
    EndDate,
    PriceAgreed,
    AmountPaid,
    PaymentDate,
    Status,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "clientName" => Ok(SortField::ClientName),
            "startDate" => Ok(SortField::StartDate),
            "endDate" => Ok(SortField::EndDate),
            "priceAgreed" => Ok(SortField::PriceAgreed),
            "amountPaid" => Ok(SortField::AmountPaid),
            "paymentDate" => Ok(SortField::PaymentDate),
            "status" => Ok(SortField::Status),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Sort order for paged listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse `field[,asc|desc]`, e.g. `startDate,desc`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.split(',').map(str::trim);
        let field = match parts.next() {
            Some(f) if !f.is_empty() => f
                .parse::<SortField>()
                .map_err(DomainError::Validation)?,
            _ => SortField::default(),
        };
        let direction = match parts.next() {
            Some(d) if !d.is_empty() => d
                .parse::<SortDirection>()
                .map_err(DomainError::Validation)?,
            _ => SortDirection::default(),
        };
        if parts.next().is_some() {
            return Err(DomainError::validation(format!("Malformed sort: {}", raw)));
        }
        Ok(Self { field, direction })
    }
}

/// Zero-based page request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: Sort) -> Self {
        Self {
            page,
            size: size.max(1),
            sort,
        }
    }

    /// Page request with the default sort (`id` ascending)
    pub fn of(page: u32, size: u32) -> Self {
        Self::new(page, size, Sort::default())
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the total count across all pages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        let size = u64::from(request.size.max(1));
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(size),
            number: request.page,
            size: request.size,
        }
    }
}
