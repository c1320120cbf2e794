//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Filtered Page Reads
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            list(page 2, size 10, {city: "Pune"})                        │
//! │                                                                         │
//! │  SELECT ... FROM customers                                             │
//! │  WHERE 1 = 1                                                           │
//! │    AND city LIKE '%Pune%' ESCAPE '\'    ← case-insensitive (ASCII)      │
//! │  ORDER BY created_at DESC, rowid DESC   ← newest first, stable ties     │
//! │  LIMIT 10 OFFSET 10                                                    │
//! │                                                                         │
//! │  count({city: "Pune"}) uses the same WHERE clause without paging       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Criteria values are always bound as parameters, never spliced into SQL.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;
use clientele_core::{Customer, CustomerFilter, CustomerInput, CustomerQuery, SortOrder};

const CUSTOMER_COLUMNS: &str =
    "id, first_name, last_name, phone, city, state, pincode, created_at, updated_at";

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// let page = PageRequest::new(1, 10)?;
/// let rows = repo.list(&CustomerQuery::page(page, CustomerFilter::all())).await?;
/// let total = repo.count(&CustomerFilter::all()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists customers matching the query's filter, in its order and window.
    pub async fn list(&self, query: &CustomerQuery) -> DbResult<Vec<Customer>> {
        debug!(filter = ?query.filter, page = ?query.page, "Listing customers");

        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM customers", CUSTOMER_COLUMNS));
        push_filter(&mut builder, &query.filter);

        builder.push(match query.order {
            SortOrder::NewestFirst => " ORDER BY created_at DESC, rowid DESC",
            SortOrder::OldestFirst => " ORDER BY created_at ASC, rowid ASC",
        });

        if let Some(page) = query.page {
            builder
                .push(" LIMIT ")
                .push_bind(to_sql_int(page.limit()))
                .push(" OFFSET ")
                .push_bind(to_sql_int(page.offset()));
        }

        let customers = builder
            .build_query_as::<Customer>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Counts all customers matching `filter`, independent of paging.
    pub async fn count(&self, filter: &CustomerFilter) -> DbResult<u64> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM customers");
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Gets a customer by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - No such customer
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = ?1",
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer.
    ///
    /// The store assigns `id`, `created_at` and `updated_at`.
    pub async fn insert(&self, input: &CustomerInput) -> DbResult<Customer> {
        let id = generate_id();
        let now = Utc::now();

        debug!(id = %id, "Inserting customer");

        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (
                id, first_name, last_name, phone, city, state, pincode,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(&id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.phone.as_deref())
        .bind(input.city.as_deref())
        .bind(input.state.as_deref())
        .bind(input.pincode.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Replaces the editable fields of an existing customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The updated row
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    pub async fn update(&self, id: &str, input: &CustomerInput) -> DbResult<Customer> {
        debug!(id = %id, "Updating customer");

        let now = Utc::now();

        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers SET
                first_name = ?2,
                last_name = ?3,
                phone = ?4,
                city = ?5,
                state = ?6,
                pincode = ?7,
                updated_at = ?8
            WHERE id = ?1
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.phone.as_deref())
        .bind(input.city.as_deref())
        .bind(input.state.as_deref())
        .bind(input.pincode.as_deref())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        customer.ok_or_else(|| DbError::not_found("Customer", id))
    }

    /// Deletes a customer. Its addresses go with it (`ON DELETE CASCADE`).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No row with this id, including one
    ///   that was already deleted
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

// =============================================================================
// Query Helpers
// =============================================================================

/// Appends the WHERE clause for `filter`. Blank criteria are skipped.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &CustomerFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(city) = filter.city_term() {
        builder
            .push(" AND city LIKE ")
            .push_bind(like_pattern(city))
            .push(r" ESCAPE '\'");
    }

    if let Some(state) = filter.state_term() {
        builder
            .push(" AND state LIKE ")
            .push_bind(like_pattern(state))
            .push(r" ESCAPE '\'");
    }

    if let Some(pincode) = filter.pincode_term() {
        builder.push(" AND pincode = ").push_bind(pincode.to_string());
    }

    if let Some(term) = filter.search_term() {
        let pattern = like_pattern(term);
        builder
            .push(" AND ((first_name || ' ' || last_name) LIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR phone LIKE ")
            .push_bind(pattern)
            .push(r" ESCAPE '\')");
    }
}

/// Wraps `term` in `%...%`, escaping LIKE wildcards inside it.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use clientele_core::PageRequest;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_pune(repo: &CustomerRepository, n: usize) {
        for i in 0..n {
            repo.insert(&CustomerInput::new(format!("Pune{}", i), "Resident").city("Pune"))
                .await
                .unwrap();
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Pune"), "%Pune%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
    }

    #[tokio::test]
    async fn test_insert_assigns_identity_and_timestamps() {
        let db = test_db().await;
        let repo = db.customers();

        let customer = repo
            .insert(&CustomerInput::new("Asha", "Kulkarni").phone("9820012345"))
            .await
            .unwrap();

        assert!(!customer.id.is_empty());
        assert_eq!(customer.first_name, "Asha");
        assert_eq!(customer.phone.as_deref(), Some("9820012345"));
        assert_eq!(customer.city, None);
        assert!(customer.updated_at >= customer.created_at);

        let fetched = repo.get_by_id(&customer.id).await.unwrap();
        assert_eq!(fetched, Some(customer));
    }

    #[tokio::test]
    async fn test_blank_name_rejected_by_store() {
        let db = test_db().await;
        let err = db
            .customers()
            .insert(&CustomerInput::new(" ", "B"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ConstraintViolation { .. }));
    }

    #[tokio::test]
    async fn test_paged_list_and_count() {
        let db = test_db().await;
        let repo = db.customers();

        seed_pune(&repo, 23).await;
        repo.insert(&CustomerInput::new("Ravi", "Iyer").city("Chennai"))
            .await
            .unwrap();

        let filter = CustomerFilter::all().city("pune");
        assert_eq!(repo.count(&filter).await.unwrap(), 23);
        assert_eq!(repo.count(&CustomerFilter::all()).await.unwrap(), 24);

        let page1 = repo
            .list(&CustomerQuery::page(PageRequest::new(1, 10).unwrap(), filter.clone()))
            .await
            .unwrap();
        let page3 = repo
            .list(&CustomerQuery::page(PageRequest::new(3, 10).unwrap(), filter.clone()))
            .await
            .unwrap();
        let page4 = repo
            .list(&CustomerQuery::page(PageRequest::new(4, 10).unwrap(), filter))
            .await
            .unwrap();

        assert_eq!(page1.len(), 10);
        assert_eq!(page3.len(), 3);
        assert!(page4.is_empty());
        assert!(page1.iter().all(|c| c.city.as_deref() == Some("Pune")));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = test_db().await;
        let repo = db.customers();

        let first = repo.insert(&CustomerInput::new("First", "One")).await.unwrap();
        let second = repo.insert(&CustomerInput::new("Second", "Two")).await.unwrap();

        let rows = repo.list(&CustomerQuery::default()).await.unwrap();
        assert_eq!(rows[0].id, second.id);
        assert_eq!(rows[1].id, first.id);

        let oldest_first = CustomerQuery {
            order: SortOrder::OldestFirst,
            ..Default::default()
        };
        let rows = repo.list(&oldest_first).await.unwrap();
        assert_eq!(rows[0].id, first.id);
    }

    #[tokio::test]
    async fn test_search_state_and_pincode_filters() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(
            &CustomerInput::new("Asha", "Kulkarni")
                .state("Maharashtra")
                .pincode("411001")
                .phone("9820012345"),
        )
        .await
        .unwrap();
        repo.insert(
            &CustomerInput::new("Ravi", "Iyer")
                .state("Tamil Nadu")
                .pincode("600001"),
        )
        .await
        .unwrap();

        let count = |filter: CustomerFilter| {
            let repo = repo.clone();
            async move { repo.count(&filter).await.unwrap() }
        };

        assert_eq!(count(CustomerFilter::all().search("asha kul")).await, 1);
        assert_eq!(count(CustomerFilter::all().search("98200")).await, 1);
        assert_eq!(count(CustomerFilter::all().state("tamil")).await, 1);
        assert_eq!(count(CustomerFilter::all().pincode("411001")).await, 1);
        // Pincode is exact, not substring
        assert_eq!(count(CustomerFilter::all().pincode("4110")).await, 0);
        // Blank criteria match everything
        assert_eq!(count(CustomerFilter::all().city("  ")).await, 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = test_db().await;
        let repo = db.customers();

        let customer = repo
            .insert(&CustomerInput::new("Asha", "Kulkarni").city("Pune"))
            .await
            .unwrap();

        let updated = repo
            .update(&customer.id, &CustomerInput::new("Asha", "Deshpande"))
            .await
            .unwrap();

        assert_eq!(updated.id, customer.id);
        assert_eq!(updated.last_name, "Deshpande");
        assert_eq!(updated.city, None);
        assert_eq!(updated.created_at, customer.created_at);
        assert!(updated.updated_at >= customer.updated_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_row() {
        let db = test_db().await;
        let repo = db.customers();

        let err = repo
            .update("missing", &CustomerInput::new("A", "B"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let customer = repo.insert(&CustomerInput::new("A", "B")).await.unwrap();
        repo.delete(&customer.id).await.unwrap();

        // Second delete of the same id is a failure, not a silent success
        let err = repo.delete(&customer.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.get_by_id(&customer.id).await.unwrap(), None);
    }
}
