//! PostgreSQL implementation of ServiceRecordRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use billables::{
    DateField, DomainError, Page, PageRequest, RecordFilter, ServiceRecord,
    ServiceRecordRepository, ServiceStatus, SortDirection, SortField,
};

/// PostgreSQL implementation of ServiceRecordRepository
pub struct PgServiceRecordRepository {
    pool: PgPool,
}

impl PgServiceRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, record: &ServiceRecord) -> Result<ServiceRecord, DomainError> {
        let row = sqlx::query_as::<_, ServiceRecordRow>(
            r#"
            INSERT INTO service_records
                (client_name, start_date, end_date, description,
                 price_agreed, amount_paid, payment_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&record.client_name)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(&record.description)
        .bind(record.price_agreed)
        .bind(record.amount_paid)
        .bind(record.payment_date)
        .bind(record.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        row.try_into()
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ServiceRecordRow {
    id: i64,
    client_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    description: String,
    price_agreed: Decimal,
    amount_paid: Option<Decimal>,
    payment_date: Option<NaiveDate>,
    status: String,
}

impl TryFrom<ServiceRecordRow> for ServiceRecord {
    type Error = DomainError;

    fn try_from(row: ServiceRecordRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ServiceStatus>()
            .map_err(DomainError::Repository)?;

        Ok(Self {
            id: Some(row.id),
            client_name: row.client_name,
            start_date: row.start_date,
            end_date: row.end_date,
            description: row.description,
            price_agreed: row.price_agreed,
            amount_paid: row.amount_paid,
            payment_date: row.payment_date,
            status,
        })
    }
}

fn repository_error(e: sqlx::Error) -> DomainError {
    DomainError::Repository(e.to_string())
}

fn date_column(field: DateField) -> &'static str {
    match field {
        DateField::StartDate => "start_date",
        DateField::EndDate => "end_date",
        DateField::PaymentDate => "payment_date",
    }
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::ClientName => "client_name",
        SortField::StartDate => "start_date",
        SortField::EndDate => "end_date",
        SortField::PriceAgreed => "price_agreed",
        SortField::AmountPaid => "amount_paid",
        SortField::PaymentDate => "payment_date",
        SortField::Status => "status",
    }
}

/// Append the WHERE clause for `filter`. Must agree with `RecordFilter::matches`.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: RecordFilter) {
    match filter {
        RecordFilter::All => {}
        RecordFilter::Pending => {
            query
                .push(" WHERE status <> ")
                .push_bind(ServiceStatus::Cancelled.as_str())
                .push(" AND (amount_paid IS NULL OR amount_paid = 0)");
        }
        RecordFilter::Completed => {
            query
                .push(" WHERE status = ")
                .push_bind(ServiceStatus::Completed.as_str());
        }
        RecordFilter::Cancelled => {
            query
                .push(" WHERE status = ")
                .push_bind(ServiceStatus::Cancelled.as_str());
        }
        RecordFilter::DateRange { field, range } => {
            query
                .push(" WHERE ")
                .push(date_column(field))
                .push(" BETWEEN ")
                .push_bind(range.start())
                .push(" AND ")
                .push_bind(range.end());
        }
    }
}

#[async_trait]
impl ServiceRecordRepository for PgServiceRecordRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceRecord>, DomainError> {
        let row =
            sqlx::query_as::<_, ServiceRecordRow>("SELECT * FROM service_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(repository_error)?;

        row.map(ServiceRecord::try_from).transpose()
    }

    async fn save(&self, record: &ServiceRecord) -> Result<ServiceRecord, DomainError> {
        let Some(id) = record.id else {
            return self.insert(record).await;
        };

        let row = sqlx::query_as::<_, ServiceRecordRow>(
            r#"
            UPDATE service_records
            SET client_name = $2, start_date = $3, end_date = $4, description = $5,
                price_agreed = $6, amount_paid = $7, payment_date = $8, status = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&record.client_name)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(&record.description)
        .bind(record.price_agreed)
        .bind(record.amount_paid)
        .bind(record.payment_date)
        .bind(record.status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        match row {
            Some(row) => row.try_into(),
            // Row vanished or never existed: store it under a fresh id
            None => self.insert(record).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM service_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    DomainError::Conflict(db.message().to_string())
                }
                _ => repository_error(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("ServiceRecord", id));
        }
        Ok(())
    }

    async fn find_page(
        &self,
        filter: RecordFilter,
        page: PageRequest,
    ) -> Result<Page<ServiceRecord>, DomainError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM service_records");
        push_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(repository_error)?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM service_records");
        push_filter(&mut query, filter);
        query.push(" ORDER BY ").push(sort_column(page.sort.field));
        query.push(match page.sort.direction {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        });
        if page.sort.field != SortField::Id {
            query.push(", id ASC");
        }
        query
            .push(" LIMIT ")
            .push_bind(i64::from(page.size))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows = query
            .build_query_as::<ServiceRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

        let content = rows
            .into_iter()
            .map(ServiceRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, total.max(0) as u64, &page))
    }

    async fn find_all_matching(
        &self,
        filter: RecordFilter,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM service_records");
        push_filter(&mut query, filter);

        let rows = query
            .build_query_as::<ServiceRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

        rows.into_iter().map(ServiceRecord::try_from).collect()
    }
}
