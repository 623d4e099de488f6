//! # Report Repository
//!
//! Read-only sales/profit aggregates over the catalog joined with the
//! ledger. The joins are explicit SQL rather than object-graph traversal,
//! so there is exactly one query per report and no hidden N+1.
//!
//! Profit and revenue use the item's *current* price and cost:
//! revenue = price × quantity, profit = (price − cost) × quantity.
//!
//! These queries are snapshot reads; no invariant depends on their
//! staleness, so they run outside any write transaction.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tally_core::{ReportFilter, SaleProfitRow, TopSeller};

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Top-selling items by lifetime quantity sold.
    ///
    /// Ordered by total quantity descending; ties break by item id
    /// ascending so the output is stable across runs. Items that never
    /// sold don't appear.
    pub async fn top_selling(&self, limit: u32) -> DbResult<Vec<TopSeller>> {
        debug!(limit, "Running top-selling report");

        let rows = sqlx::query_as::<_, TopSeller>(
            r#"
            SELECT
                i.name AS item_name,
                SUM(s.quantity) AS total_quantity,
                SUM((i.price_cents - i.cost_cents) * s.quantity) AS total_profit_cents
            FROM sold_records s
            INNER JOIN items i ON i.id = s.item_id
            GROUP BY s.item_id
            ORDER BY total_quantity DESC, s.item_id ASC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Per-sale revenue/profit breakdown, optionally narrowed by an exact
    /// sale id or an item-name substring. Unfiltered returns every ledger
    /// row, in sale id order.
    pub async fn sales_and_profit(
        &self,
        filter: Option<&ReportFilter>,
    ) -> DbResult<Vec<SaleProfitRow>> {
        debug!(?filter, "Running sales/profit report");

        const BASE: &str = r#"
            SELECT
                s.id AS sale_id,
                i.name AS item_name,
                i.price_cents AS unit_price_cents,
                s.quantity AS quantity,
                i.price_cents * s.quantity AS revenue_cents,
                (i.price_cents - i.cost_cents) * s.quantity AS profit_cents
            FROM sold_records s
            INNER JOIN items i ON i.id = s.item_id
        "#;

        let rows = match filter {
            None => {
                sqlx::query_as::<_, SaleProfitRow>(&format!("{BASE} ORDER BY s.id"))
                    .fetch_all(&self.pool)
                    .await?
            }
            Some(ReportFilter::SaleId(id)) => {
                sqlx::query_as::<_, SaleProfitRow>(&format!(
                    "{BASE} WHERE s.id = ?1 ORDER BY s.id"
                ))
                .bind(*id)
                .fetch_all(&self.pool)
                .await?
            }
            Some(ReportFilter::NameContains(needle)) => {
                sqlx::query_as::<_, SaleProfitRow>(&format!(
                    "{BASE} WHERE i.name LIKE ?1 ORDER BY s.id"
                ))
                .bind(format!("%{needle}%"))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{draft, seed_cashier, test_db};

    /// Item A: qty 3 sold, price $10, cost $6 → profit $12.
    /// Item B: qty 5 sold, price $20, cost $15 → profit $25.
    async fn seed_two_sales(db: &crate::Database) -> (i64, i64) {
        let cashier = seed_cashier(db, "casey").await;
        let a = db
            .items()
            .upsert(&draft("Alpha Widget", "Tool", 10, 1000, 600))
            .await
            .unwrap();
        let b = db
            .items()
            .upsert(&draft("Beta Widget", "Tool", 10, 2000, 1500))
            .await
            .unwrap();

        let sale_a = db
            .checkout()
            .sell(a.id, 3, cashier.id)
            .await
            .unwrap()
            .record()
            .unwrap()
            .id;
        let sale_b = db
            .checkout()
            .sell(b.id, 5, cashier.id)
            .await
            .unwrap()
            .record()
            .unwrap()
            .id;

        (sale_a, sale_b)
    }

    #[tokio::test]
    async fn test_top_selling_orders_by_quantity() {
        let db = test_db().await;
        seed_two_sales(&db).await;

        let top = db.reports().top_selling(1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].item_name, "Beta Widget");
        assert_eq!(top[0].total_quantity, 5);
        assert_eq!(top[0].total_profit_cents, 2500);

        let both = db.reports().top_selling(10).await.unwrap();
        assert_eq!(both.len(), 2);
        assert_eq!(both[1].item_name, "Alpha Widget");
        assert_eq!(both[1].total_quantity, 3);
        assert_eq!(both[1].total_profit_cents, 1200);
    }

    #[tokio::test]
    async fn test_top_selling_aggregates_repeat_sales() {
        let db = test_db().await;
        let cashier = seed_cashier(&db, "casey").await;
        let item = db
            .items()
            .upsert(&draft("Sugar", "Grocery", 20, 300, 180))
            .await
            .unwrap();

        for _ in 0..3 {
            let outcome = db.checkout().sell(item.id, 2, cashier.id).await.unwrap();
            assert!(outcome.is_committed());
        }

        let top = db.reports().top_selling(5).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].total_quantity, 6);
        // (300 - 180) * 6
        assert_eq!(top[0].total_profit_cents, 720);
    }

    #[tokio::test]
    async fn test_sales_and_profit_unfiltered() {
        let db = test_db().await;
        let (sale_a, sale_b) = seed_two_sales(&db).await;

        let rows = db.reports().sales_and_profit(None).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sale_id, sale_a);
        assert_eq!(rows[1].sale_id, sale_b);

        // revenue = price * qty, profit = (price - cost) * qty
        assert_eq!(rows[0].revenue_cents, 3000);
        assert_eq!(rows[0].profit_cents, 1200);
        assert_eq!(rows[1].revenue_cents, 10000);
        assert_eq!(rows[1].profit_cents, 2500);
    }

    #[tokio::test]
    async fn test_sales_and_profit_filters() {
        let db = test_db().await;
        let (sale_a, _) = seed_two_sales(&db).await;

        // Exact sale id.
        let by_id = db
            .reports()
            .sales_and_profit(ReportFilter::parse(&sale_a.to_string()).as_ref())
            .await
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].item_name, "Alpha Widget");

        // Name substring, case-insensitive.
        let by_name = db
            .reports()
            .sales_and_profit(ReportFilter::parse("beta").as_ref())
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].item_name, "Beta Widget");

        // Empty filter input means no filter at all.
        let all = db
            .reports()
            .sales_and_profit(ReportFilter::parse("").as_ref())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }
}
