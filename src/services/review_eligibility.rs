//! Purchase verification for reviews.
//!
//! A user may review a product only when one of the orders containing the
//! product was placed by that user. Lookups are batched: one query for the
//! ordered-product rows, one for their orders.

use crate::db;
use crate::models;
use sqlx::PgPool;

/// Buyers of every order that references `product`.
pub async fn buyers_of(pool: &PgPool, product: &models::Product) -> Result<Vec<String>, String> {
    let ordered = db::order::fetch_ordered_by_product(pool, product.id).await?;
    let mut order_ids: Vec<i32> = ordered.iter().map(|line| line.order_id).collect();
    order_ids.sort_unstable();
    order_ids.dedup();

    let orders = db::order::fetch_orders_by_ids(pool, &order_ids).await?;
    Ok(orders.into_iter().map(|order| order.buyer).collect())
}

pub fn is_buyer(user_id: &str, buyers: &[String]) -> bool {
    buyers.iter().any(|buyer| buyer == user_id)
}

#[tracing::instrument(name = "Check review eligibility.", skip(pool, product), fields(product = %product.short_id))]
pub async fn can_review(
    pool: &PgPool,
    user_id: &str,
    product: &models::Product,
) -> Result<bool, String> {
    let buyers = buyers_of(pool, product).await?;
    let eligible = is_buyer(user_id, &buyers);
    tracing::debug!("{} buyers found, eligible: {}", buyers.len(), eligible);

    Ok(eligible)
}
