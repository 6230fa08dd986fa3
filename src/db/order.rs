use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_ordered_by_product(
    pool: &PgPool,
    product_id: i32,
) -> Result<Vec<models::OrderedProduct>, String> {
    let query_span = tracing::info_span!("Fetch ordered products by product id.", product_id);
    sqlx::query_as::<_, models::OrderedProduct>(
        r#"SELECT id, order_id, product_id, quantity FROM ordered_product WHERE product_id = $1"#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch ordered products, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_orders_by_ids(pool: &PgPool, ids: &[i32]) -> Result<Vec<models::Order>, String> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let query_span = tracing::info_span!("Fetch orders by ids.", count = ids.len());
    sqlx::query_as::<_, models::Order>(
        r#"SELECT id, buyer, created_at FROM orders WHERE id = ANY($1)"#,
    )
    .bind(ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch orders, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
