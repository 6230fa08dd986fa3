use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_small_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<models::SmallCategory>, String> {
    let query_span = tracing::info_span!("Fetch small category by name.", name = %name);
    sqlx::query_as::<_, models::SmallCategory>(
        r#"SELECT id, name, big_category_id FROM small_category WHERE name = $1 LIMIT 1"#,
    )
    .bind(name)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch small category, error: {:?}", err);
        "Could not fetch category".to_string()
    })
}

pub async fn fetch_big_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<models::BigCategory>, String> {
    let query_span = tracing::info_span!("Fetch big category by name.", name = %name);
    sqlx::query_as::<_, models::BigCategory>(
        r#"SELECT id, name FROM big_category WHERE name = $1 LIMIT 1"#,
    )
    .bind(name)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch big category, error: {:?}", err);
        "Could not fetch category".to_string()
    })
}

pub async fn fetch_all_big(pool: &PgPool) -> Result<Vec<models::BigCategory>, String> {
    let query_span = tracing::info_span!("Fetch all big categories.");
    sqlx::query_as::<_, models::BigCategory>(r#"SELECT id, name FROM big_category ORDER BY id"#)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch big categories, error: {:?}", err);
            "Could not fetch categories".to_string()
        })
}

/// Small categories are probed first, big ones only when no leaf matches.
pub async fn resolve(pool: &PgPool, name: &str) -> Result<Option<models::CategoryScope>, String> {
    if let Some(small) = fetch_small_by_name(pool, name).await? {
        tracing::debug!("Category {} resolved as small category {}", name, small.id);
        return Ok(Some(models::CategoryScope::Small(small)));
    }

    let big = fetch_big_by_name(pool, name).await?;
    if big.is_none() {
        tracing::debug!("Category {} is unknown", name);
    }

    Ok(big.map(models::CategoryScope::Big))
}
