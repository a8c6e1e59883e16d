//! ServiceRecord Repository Port
//!
//! Abstract interface for service record persistence operations.

use async_trait::async_trait;

use crate::domain::{DomainError, Page, PageRequest, RecordFilter, ServiceRecord};

/// Repository interface for ServiceRecord entities
#[async_trait]
pub trait ServiceRecordRepository: Send + Sync {
    /// Find a record by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceRecord>, DomainError>;

    /// Save a record.
    ///
    /// Inserts when `id` is `None`, otherwise replaces the stored row. A
    /// record whose id is no longer stored is inserted under a new id.
    async fn save(&self, record: &ServiceRecord) -> Result<ServiceRecord, DomainError>;

    /// Delete a record by ID.
    ///
    /// Fails with `NotFound` when absent and `Conflict` when the store
    /// refuses the delete for integrity reasons.
    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;

    /// One page of the records matching `filter`
    async fn find_page(
        &self,
        filter: RecordFilter,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, DomainError>;

    /// Every record matching `filter`, in no particular order
    async fn find_all_matching(
        &self,
        filter: RecordFilter,
    ) -> Result<Vec<ServiceRecord>, DomainError>;
}
