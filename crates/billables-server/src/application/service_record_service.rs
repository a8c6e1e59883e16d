//! ServiceRecord Application Service (Use Case)
//!
//! Loads records, runs the reconciliation rules and persists the outcome.
//! Each call is one read-then-write with no locking; concurrent writers to
//! the same id resolve as last-write-wins in the store.

use std::sync::Arc;

use billables::domain::services::reconciliation;
use billables::{
    Clock, DateField, DateRange, DomainError, Page, PageRequest, RecordFilter, ServiceRecord,
    ServiceRecordInput, ServiceRecordRepository,
};

const ENTITY: &str = "ServiceRecord";

/// Application service for service record operations
pub struct ServiceRecordService<R: ServiceRecordRepository + ?Sized, C: Clock + ?Sized> {
    repo: Arc<R>,
    clock: Arc<C>,
}

impl<R: ServiceRecordRepository + ?Sized, C: Clock + ?Sized> ServiceRecordService<R, C> {
    pub fn new(repo: Arc<R>, clock: Arc<C>) -> Self {
        Self { repo, clock }
    }

    /// Page through every record
    pub async fn find_all(&self, page: PageRequest) -> Result<Page<ServiceRecord>, DomainError> {
        self.repo.find_page(RecordFilter::All, page).await
    }

    /// Get a record by ID
    pub async fn find_by_id(&self, id: i64) -> Result<ServiceRecord, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// Records whose payment date falls inside `range`
    pub async fn range_by_payment_date(
        &self,
        range: DateRange,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        self.range(DateField::PaymentDate, range).await
    }

    /// Records whose start date falls inside `range`
    pub async fn range_by_start_date(
        &self,
        range: DateRange,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        self.range(DateField::StartDate, range).await
    }

    /// Records whose end date falls inside `range`
    pub async fn range_by_end_date(
        &self,
        range: DateRange,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        self.range(DateField::EndDate, range).await
    }

    async fn range(
        &self,
        field: DateField,
        range: DateRange,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        self.repo
            .find_all_matching(RecordFilter::date_range(field, range))
            .await
    }

    /// Records still awaiting payment (not cancelled, nothing paid)
    pub async fn list_pending(
        &self,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, DomainError> {
        self.repo.find_page(RecordFilter::Pending, page).await
    }

    pub async fn list_cancelled(
        &self,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, DomainError> {
        self.repo.find_page(RecordFilter::Cancelled, page).await
    }

    pub async fn list_completed(
        &self,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, DomainError> {
        self.repo.find_page(RecordFilter::Completed, page).await
    }

    /// Create a new record with its status derived from the payment fields
    pub async fn create(&self, input: ServiceRecordInput) -> Result<ServiceRecord, DomainError> {
        input.validate()?;

        let record = reconciliation::reconcile_insert(input, self.clock.today());
        let saved = self.repo.save(&record).await?;

        tracing::info!(
            "Created service record: {} ({:?}) - {}",
            saved.client_name,
            saved.id,
            saved.status
        );

        Ok(saved)
    }

    /// Update a record, reconciling status against the stored version.
    ///
    /// An id that is not stored is saved as sent rather than rejected.
    pub async fn update(&self, input: ServiceRecordInput) -> Result<ServiceRecord, DomainError> {
        input.validate()?;
        let id = input
            .id
            .ok_or_else(|| DomainError::validation("id is required for update"))?;

        let today = self.clock.today();
        let record = match self.repo.find_by_id(id).await? {
            Some(existing) => {
                let previous = existing.status;
                let record = reconciliation::reconcile_update(input, existing, today);
                if record.status != previous {
                    tracing::info!(
                        "Service record {} moved {} -> {}",
                        id,
                        previous,
                        record.status
                    );
                }
                record
            }
            None => {
                tracing::warn!(
                    "⚠️  Update for unknown service record {} - saving as new",
                    id
                );
                reconciliation::reconcile_detached(input, today)
            }
        };

        self.repo.save(&record).await
    }

    /// Cancel a record; payment fields are kept
    pub async fn cancel(&self, id: i64) -> Result<ServiceRecord, DomainError> {
        let current = self.find_by_id(id).await?;
        let saved = self.repo.save(&reconciliation::cancel(current)).await?;

        tracing::info!("Cancelled service record: {}", id);

        Ok(saved)
    }

    /// Reopen a record as pending with its payment cleared
    pub async fn reactivate(&self, id: i64) -> Result<ServiceRecord, DomainError> {
        let current = self.find_by_id(id).await?;
        let saved = self.repo.save(&reconciliation::reactivate(current)).await?;

        tracing::info!("Reactivated service record: {}", id);

        Ok(saved)
    }

    /// Delete a record
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete_by_id(id).await?;
        tracing::info!("Deleted service record: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryServiceRecordRepository;
    use billables::{FixedClock, ServiceStatus, Sort, SortDirection, SortField};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    type TestService = ServiceRecordService<InMemoryServiceRecordRepository, FixedClock>;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn service() -> (TestService, Arc<InMemoryServiceRecordRepository>) {
        let repo = Arc::new(InMemoryServiceRecordRepository::new());
        let service = ServiceRecordService::new(repo.clone(), Arc::new(FixedClock(today())));
        (service, repo)
    }

    fn input(client: &str, price: Decimal, paid: Option<Decimal>) -> ServiceRecordInput {
        ServiceRecordInput {
            client_name: client.to_string(),
            description: "Consulting".to_string(),
            price_agreed: price,
            amount_paid: paid,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (service, _) = service();

        let created = service
            .create(input("Alice", dec!(100), Some(dec!(0))))
            .await
            .unwrap();
        assert_eq!(created.status, ServiceStatus::Pending);
        assert_eq!(created.payment_date, None);
        let id = created.id.unwrap();

        let mut paid = input("Alice", dec!(100), Some(dec!(100)));
        paid.id = Some(id);
        let updated = service.update(paid).await.unwrap();
        assert_eq!(updated.status, ServiceStatus::Completed);
        assert_eq!(updated.payment_date, Some(today()));

        let cancelled = service.cancel(id).await.unwrap();
        assert_eq!(cancelled.status, ServiceStatus::Cancelled);
        assert_eq!(cancelled.amount_paid, Some(dec!(100)));

        let reactivated = service.reactivate(id).await.unwrap();
        assert_eq!(reactivated.status, ServiceStatus::Pending);
        assert_eq!(reactivated.amount_paid, Some(Decimal::ZERO));
        assert_eq!(reactivated.payment_date, None);

        let stored = service.find_by_id(id).await.unwrap();
        assert_eq!(stored, reactivated);
    }

    #[tokio::test]
    async fn test_create_with_payment_stamps_today() {
        let (service, _) = service();
        let created = service
            .create(input("Bob", dec!(80), Some(dec!(20))))
            .await
            .unwrap();
        assert_eq!(created.status, ServiceStatus::Completed);
        assert_eq!(created.payment_date, Some(today()));
        assert_eq!(created.start_date, today());
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let (service, repo) = service();
        let err = service
            .create(input("Bob", dec!(-5), None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let (service, _) = service();
        let err = service
            .update(input("Alice", dec!(100), None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_saves_new_record() {
        let (service, repo) = service();
        let mut detached = input("Carol", dec!(50), None);
        detached.id = Some(404);
        let saved = service.update(detached).await.unwrap();
        assert_eq!(saved.status, ServiceStatus::Pending);
        assert!(saved.id.is_some());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_cancel_and_reactivate_unknown_id() {
        let (service, _) = service();
        assert!(service.cancel(9).await.unwrap_err().is_not_found());
        assert!(service.reactivate(9).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, _) = service();
        let created = service
            .create(input("Dave", dec!(10), None))
            .await
            .unwrap();
        let id = created.id.unwrap();

        service.delete(id).await.unwrap();
        assert!(service.find_by_id(id).await.unwrap_err().is_not_found());
        assert!(service.delete(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_conflict_propagates() {
        let (service, repo) = service();
        let created = service
            .create(input("Erin", dec!(10), None))
            .await
            .unwrap();
        let id = created.id.unwrap();
        repo.protect(id).await;

        let err = service.delete(id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(service.find_by_id(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_status_listings() {
        let (service, _) = service();
        let pending = service
            .create(input("Pending", dec!(10), None))
            .await
            .unwrap();
        let completed = service
            .create(input("Completed", dec!(10), Some(dec!(10))))
            .await
            .unwrap();
        let cancelled = service
            .create(input("Cancelled", dec!(10), None))
            .await
            .unwrap();
        service.cancel(cancelled.id.unwrap()).await.unwrap();

        let page = PageRequest::of(0, 20);
        let ids = |p: Page<ServiceRecord>| p.content.into_iter().map(|r| r.id).collect::<Vec<_>>();

        assert_eq!(ids(service.list_pending(page).await.unwrap()), vec![pending.id]);
        assert_eq!(
            ids(service.list_completed(page).await.unwrap()),
            vec![completed.id]
        );
        assert_eq!(
            ids(service.list_cancelled(page).await.unwrap()),
            vec![cancelled.id]
        );
        assert_eq!(service.find_all(page).await.unwrap().total_elements, 3);
    }

    #[tokio::test]
    async fn test_range_queries_are_inclusive() {
        let (service, _) = service();
        let mut early = input("Early", dec!(10), None);
        early.start_date = Some(date(2024, 1, 1));
        early.end_date = Some(date(2024, 1, 31));
        let early = service.create(early).await.unwrap();

        let mut late = input("Late", dec!(10), Some(dec!(10)));
        late.start_date = Some(date(2024, 3, 1));
        late.end_date = Some(date(2024, 3, 31));
        let late = service.create(late).await.unwrap();

        let january = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let started = service.range_by_start_date(january).await.unwrap();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].id, early.id);

        let ended = service.range_by_end_date(january).await.unwrap();
        assert_eq!(ended.len(), 1);
        assert_eq!(ended[0].id, early.id);

        let paid_today = DateRange::new(today(), today()).unwrap();
        let paid = service.range_by_payment_date(paid_today).await.unwrap();
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].id, late.id);
    }

    #[tokio::test]
    async fn test_find_all_pages_and_sorts() {
        let (service, _) = service();
        for (name, price) in [("Ann", dec!(30)), ("Ben", dec!(10)), ("Cat", dec!(20))] {
            service.create(input(name, price, None)).await.unwrap();
        }

        let sort = Sort::new(SortField::PriceAgreed, SortDirection::Desc);
        let first = service
            .find_all(PageRequest::new(0, 2, sort))
            .await
            .unwrap();
        assert_eq!(first.total_elements, 3);
        assert_eq!(first.total_pages, 2);
        let names: Vec<_> = first.content.iter().map(|r| r.client_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Cat"]);

        let second = service
            .find_all(PageRequest::new(1, 2, sort))
            .await
            .unwrap();
        assert_eq!(second.content.len(), 1);
        assert_eq!(second.content[0].client_name, "Ben");
    }
}
