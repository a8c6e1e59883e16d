//! In-memory implementation of ServiceRecordRepository
//!
//! Mirrors the PostgreSQL adapter's semantics (id allocation, NULL ordering,
//! detached saves) so application and route tests run without a database.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use billables::{
    DomainError, Page, PageRequest, RecordFilter, ServiceRecord, ServiceRecordRepository,
    SortDirection, SortField,
};

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, ServiceRecord>,
    /// Ids whose delete is refused, standing in for rows referenced elsewhere
    protected: HashSet<i64>,
}

impl Store {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct InMemoryServiceRecordRepository {
    store: RwLock<Store>,
}

impl InMemoryServiceRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.rows.len()
    }

    /// Make deletes of `id` fail with an integrity conflict
    pub async fn protect(&self, id: i64) {
        self.store.write().await.protected.insert(id);
    }
}

/// NULLs sort after every value, as PostgreSQL does for `ASC`
fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(a: &ServiceRecord, b: &ServiceRecord, field: SortField) -> Ordering {
    match field {
        SortField::Id => nulls_last(&a.id, &b.id),
        SortField::ClientName => a.client_name.cmp(&b.client_name),
        SortField::StartDate => a.start_date.cmp(&b.start_date),
        SortField::EndDate => a.end_date.cmp(&b.end_date),
        SortField::PriceAgreed => a.price_agreed.cmp(&b.price_agreed),
        SortField::AmountPaid => nulls_last(&a.amount_paid, &b.amount_paid),
        SortField::PaymentDate => nulls_last(&a.payment_date, &b.payment_date),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

#[async_trait]
impl ServiceRecordRepository for InMemoryServiceRecordRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceRecord>, DomainError> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, record: &ServiceRecord) -> Result<ServiceRecord, DomainError> {
        let mut store = self.store.write().await;
        let id = match record.id {
            Some(id) if store.rows.contains_key(&id) => id,
            _ => store.allocate(),
        };

        let saved = ServiceRecord {
            id: Some(id),
            ..record.clone()
        };
        store.rows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        if !store.rows.contains_key(&id) {
            return Err(DomainError::not_found("ServiceRecord", id));
        }
        if store.protected.contains(&id) {
            return Err(DomainError::Conflict(format!(
                "service record {} is still referenced",
                id
            )));
        }
        store.rows.remove(&id);
        Ok(())
    }

    async fn find_page(
        &self,
        filter: RecordFilter,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, DomainError> {
        let mut matching = self.find_all_matching(filter).await?;
        matching.sort_by(|a, b| {
            let ordering = match page.sort.direction {
                SortDirection::Asc => compare(a, b, page.sort.field),
                SortDirection::Desc => compare(b, a, page.sort.field),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let content = matching
            .into_iter()
            .skip(offset)
            .take(page.size as usize)
            .collect();

        Ok(Page::new(content, total, &page))
    }

    async fn find_all_matching(
        &self,
        filter: RecordFilter,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        Ok(self
            .store
            .read()
            .await
            .rows
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
