//! # Price Repository
//!
//! Database operations for price-list entries.
//!
//! ## Key Operations
//! - Candidate listing for in-process resolution
//! - Best-match lookup resolved entirely in SQL
//! - Validated inserts (single and batched)
//!
//! ## Best Match in SQL
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE product_id = ?  AND brand_id = ?                                 │
//! │    AND start_date <= instant AND end_date >= instant   (inclusive)      │
//! │  ORDER BY priority DESC, id ASC                        (tie → oldest)   │
//! │  LIMIT 1                                                                │
//! │                                                                         │
//! │  id is the insertion sequence, which is also the order                  │
//! │  list_candidates returns rows in. Both paths share the tie-break.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use pricing_core::validation::validate_rule;
use pricing_core::{
    BrandId, CoreResult, Money, PriceCandidateSource, PriceListId, PriceMatchSource, PriceQuery,
    PriceRule, ProductId,
};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        brand_id,
        start_date,
        end_date,
        price_list,
        product_id,
        priority,
        price_cents,
        currency
    FROM prices
"#;

/// One row of the `prices` table.
#[derive(Debug, sqlx::FromRow)]
struct PriceRow {
    id: i64,
    brand_id: i64,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    price_list: i64,
    product_id: i64,
    priority: i32,
    price_cents: i64,
    currency: String,
}

impl TryFrom<PriceRow> for PriceRule {
    type Error = DbError;

    fn try_from(row: PriceRow) -> DbResult<Self> {
        let currency = row.currency.parse().map_err(|e| DbError::InvalidRow {
            id: row.id,
            reason: format!("{}", e),
        })?;

        Ok(PriceRule {
            brand_id: BrandId::new(row.brand_id),
            product_id: ProductId::new(row.product_id),
            price_list_id: PriceListId::new(row.price_list),
            valid_from: row.start_date,
            valid_to: row.end_date,
            priority: row.priority,
            amount: Money::from_cents(row.price_cents),
            currency,
        })
    }
}

/// Repository for price database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = PriceRepository::new(pool);
///
/// let candidates = repo.list_candidates(product, brand).await?;
/// let best = repo.find_best_match(&query).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PriceRepository {
    pool: SqlitePool,
}

impl PriceRepository {
    /// Creates a new PriceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PriceRepository { pool }
    }

    /// Lists every rule of a product/brand in insertion order.
    ///
    /// No validity filtering: that is the resolver's job.
    pub async fn list_candidates(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
    ) -> DbResult<Vec<PriceRule>> {
        debug!(product_id = %product_id, brand_id = %brand_id, "Listing price candidates");

        let sql = format!(
            "{} WHERE product_id = ?1 AND brand_id = ?2 ORDER BY id ASC",
            SELECT_COLUMNS
        );

        let rows: Vec<PriceRow> = sqlx::query_as(&sql)
            .bind(product_id.get())
            .bind(brand_id.get())
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Candidates loaded");
        rows.into_iter().map(PriceRule::try_from).collect()
    }

    /// Finds the highest-priority rule active at the query instant.
    ///
    /// ## Returns
    /// * `Ok(Some(rule))` - a rule applies
    /// * `Ok(None)` - nothing applies (unknown product/brand included)
    pub async fn find_best_match(&self, query: &PriceQuery) -> DbResult<Option<PriceRule>> {
        debug!(
            product_id = %query.product_id,
            brand_id = %query.brand_id,
            instant = %query.instant,
            "Looking up best price match"
        );

        let sql = format!(
            "{} WHERE product_id = ?1 AND brand_id = ?2 \
               AND start_date <= ?3 AND end_date >= ?3 \
             ORDER BY priority DESC, id ASC \
             LIMIT 1",
            SELECT_COLUMNS
        );

        let row: Option<PriceRow> = sqlx::query_as(&sql)
            .bind(query.product_id.get())
            .bind(query.brand_id.get())
            .bind(query.instant)
            .fetch_optional(&self.pool)
            .await?;

        row.map(PriceRule::try_from).transpose()
    }

    /// Inserts a rule after validating it.
    ///
    /// ## Returns
    /// * `Ok(id)` - row id, which is also its tie-break position
    /// * `Err(DbError::Validation)` - rule rejected before touching the database
    pub async fn insert(&self, rule: &PriceRule) -> DbResult<i64> {
        validate_rule(rule)?;

        debug!(
            product_id = %rule.product_id,
            brand_id = %rule.brand_id,
            price_list = %rule.price_list_id,
            "Inserting price rule"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO prices (
                brand_id, start_date, end_date, price_list,
                product_id, priority, price_cents, currency
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(rule.brand_id.get())
        .bind(rule.valid_from)
        .bind(rule.valid_to)
        .bind(rule.price_list_id.get())
        .bind(rule.product_id.get())
        .bind(rule.priority)
        .bind(rule.amount.cents())
        .bind(rule.currency.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Inserts many rules in one transaction, in slice order.
    ///
    /// Every rule is validated first; one bad rule rejects the whole batch.
    pub async fn insert_all(&self, rules: &[PriceRule]) -> DbResult<usize> {
        for rule in rules {
            validate_rule(rule)?;
        }

        let mut tx = self.pool.begin().await?;

        for rule in rules {
            sqlx::query(
                r#"
                INSERT INTO prices (
                    brand_id, start_date, end_date, price_list,
                    product_id, priority, price_cents, currency
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(rule.brand_id.get())
            .bind(rule.valid_from)
            .bind(rule.valid_to)
            .bind(rule.price_list_id.get())
            .bind(rule.product_id.get())
            .bind(rule.priority)
            .bind(rule.amount.cents())
            .bind(rule.currency.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(count = rules.len(), "Inserted price rules");
        Ok(rules.len())
    }

    /// Removes every rule. Returns the number of rows deleted.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM prices")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts stored rules (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl PriceCandidateSource for PriceRepository {
    async fn list_candidates(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
    ) -> CoreResult<Vec<PriceRule>> {
        Ok(PriceRepository::list_candidates(self, product_id, brand_id).await?)
    }
}

#[async_trait]
impl PriceMatchSource for PriceRepository {
    async fn find_best_match(&self, query: &PriceQuery) -> CoreResult<Option<PriceRule>> {
        Ok(PriceRepository::find_best_match(self, query).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
