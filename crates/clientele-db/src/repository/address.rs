//! # Address Repository
//!
//! Database operations for customer addresses.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert(NewAddress { customer_id, .. })                                │
//! │       └── customer_id written once; FOREIGN KEY → customers(id)         │
//! │                                                                         │
//! │  update(id, AddressInput { customer_id: Some("x"), .. })               │
//! │       └── customer_id column is not in the SET list; the payload        │
//! │           owner is ignored and a trigger rejects any other attempt      │
//! │                                                                         │
//! │  DELETE FROM customers WHERE id = ?                                    │
//! │       └── ON DELETE CASCADE removes that customer's addresses           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;
use clientele_core::{Address, AddressInput, NewAddress};

const ADDRESS_COLUMNS: &str =
    "id, customer_id, address_line, city, state, pincode, created_at, updated_at";

/// Repository for address database operations.
#[derive(Debug, Clone)]
pub struct AddressRepository {
    pool: SqlitePool,
}

impl AddressRepository {
    /// Creates a new AddressRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AddressRepository { pool }
    }

    /// Lists every address of one customer, newest first.
    ///
    /// An unknown customer id yields an empty list, not an error.
    pub async fn list_for_customer(&self, customer_id: &str) -> DbResult<Vec<Address>> {
        debug!(customer_id = %customer_id, "Listing addresses");

        let addresses = sqlx::query_as::<_, Address>(&format!(
            r#"
            SELECT {} FROM addresses
            WHERE customer_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
            ADDRESS_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }

    /// Gets an address by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "SELECT {} FROM addresses WHERE id = ?1",
            ADDRESS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    /// Inserts a new address.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - The owning customer doesn't exist
    pub async fn insert(&self, address: &NewAddress) -> DbResult<Address> {
        let id = generate_id();
        let now = Utc::now();

        debug!(id = %id, customer_id = %address.customer_id, "Inserting address");

        let inserted = sqlx::query_as::<_, Address>(&format!(
            r#"
            INSERT INTO addresses (
                id, customer_id, address_line, city, state, pincode,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING {}
            "#,
            ADDRESS_COLUMNS
        ))
        .bind(&id)
        .bind(&address.customer_id)
        .bind(&address.address_line)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.pincode)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Replaces the editable fields of an address. The owner never changes.
    pub async fn update(&self, id: &str, input: &AddressInput) -> DbResult<Address> {
        debug!(id = %id, "Updating address");

        let now = Utc::now();

        let updated = sqlx::query_as::<_, Address>(&format!(
            r#"
            UPDATE addresses SET
                address_line = ?2,
                city = ?3,
                state = ?4,
                pincode = ?5,
                updated_at = ?6
            WHERE id = ?1
            RETURNING {}
            "#,
            ADDRESS_COLUMNS
        ))
        .bind(id)
        .bind(&input.address_line)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pincode)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::not_found("Address", id))
    }

    /// Deletes an address.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No row with this id
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting address");

        let result = sqlx::query("DELETE FROM addresses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Address", id));
        }

        Ok(())
    }

    /// Counts the addresses of one customer.
    pub async fn count_for_customer(&self, customer_id: &str) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses WHERE customer_id = ?1")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
