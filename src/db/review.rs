use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

fn fetch_error(err: sqlx::Error) -> String {
    tracing::error!("Failed to fetch reviews, error: {:?}", err);
    "Could not fetch data".to_string()
}

fn write_error(err: sqlx::Error) -> String {
    tracing::error!("Failed to execute query: {:?}", err);
    "Could not save review".to_string()
}

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Review>, String> {
    tracing::info!("Fetch review {}", id);
    sqlx::query_as::<_, models::Review>(r#"SELECT * FROM review WHERE id = $1 LIMIT 1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(fetch_error)
}

pub async fn fetch_by_author(pool: &PgPool, author_id: &str) -> Result<Vec<models::Review>, String> {
    let query_span = tracing::info_span!("Fetch reviews by author.");
    sqlx::query_as::<_, models::Review>(
        r#"SELECT * FROM review WHERE author_id = $1 ORDER BY created_at DESC, id DESC"#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

/// Reviews with the given ids, oldest first, unknown ids skipped.
pub async fn fetch_by_ids(pool: &PgPool, ids: &[i32]) -> Result<Vec<models::Review>, String> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let query_span = tracing::info_span!("Fetch reviews by ids.", count = ids.len());
    sqlx::query_as::<_, models::Review>(
        r#"SELECT * FROM review WHERE id = ANY($1) ORDER BY created_at, id"#,
    )
    .bind(ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

/// Inserts the review, links it to the product and bumps the product's
/// rating aggregate in one transaction.
#[tracing::instrument(name = "Saving new review into the database", skip(pool, review))]
pub async fn insert_for_product(
    pool: &PgPool,
    product_id: i32,
    mut review: models::Review,
) -> Result<models::Review, String> {
    let mut tx = pool.begin().await.map_err(write_error)?;

    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO review (comment, star_rate, author_id, author_name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&review.comment)
    .bind(review.star_rate)
    .bind(&review.author_id)
    .bind(&review.author_name)
    .bind(review.created_at)
    .bind(review.updated_at)
    .fetch_one(&mut *tx)
    .await
    .map_err(write_error)?;

    let linked = sqlx::query::<sqlx::Postgres>(
        r#"
        UPDATE product
        SET
            review_ids = array_append(review_ids, $2),
            star_rate_sum = star_rate_sum + $3,
            review_count = review_count + 1
        WHERE id = $1
        "#,
    )
    .bind(product_id)
    .bind(id)
    .bind(review.star_rate)
    .execute(&mut *tx)
    .await
    .map_err(write_error)?;

    if linked.rows_affected() == 0 {
        tracing::error!("Product {} vanished before review {} was linked", product_id, id);
        return Err("Product not found".to_string());
    }

    tx.commit().await.map_err(write_error)?;
    tracing::info!("New review {} have been saved to database", id);

    review.id = id;
    Ok(review)
}

/// Saves comment and rating, moving the owning product's `star_rate_sum`
/// by the rating difference. `None` when the review no longer exists.
#[tracing::instrument(name = "Updating review", skip(pool, review), fields(id = review.id))]
pub async fn update(
    pool: &PgPool,
    review: models::Review,
) -> Result<Option<models::Review>, String> {
    let mut tx = pool.begin().await.map_err(write_error)?;

    let previous_rate = sqlx::query_scalar::<_, i32>(
        r#"SELECT star_rate FROM review WHERE id = $1 FOR UPDATE"#,
    )
    .bind(review.id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(write_error)?;

    let Some(previous_rate) = previous_rate else {
        return Ok(None);
    };

    let saved = sqlx::query_as::<_, models::Review>(
        r#"
        UPDATE review
        SET comment = $2, star_rate = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(review.id)
    .bind(&review.comment)
    .bind(review.star_rate)
    .fetch_one(&mut *tx)
    .await
    .map_err(write_error)?;

    if saved.star_rate != previous_rate {
        sqlx::query::<sqlx::Postgres>(
            r#"
            UPDATE product
            SET star_rate_sum = star_rate_sum + $2
            WHERE $1 = ANY(review_ids)
            "#,
        )
        .bind(saved.id)
        .bind(saved.star_rate - previous_rate)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;
    }

    tx.commit().await.map_err(write_error)?;
    tracing::info!("Review {} have been saved", saved.id);

    Ok(Some(saved))
}

/// Deletes the review and unlinks it from its product. `Ok(false)` when
/// there was nothing to delete.
#[tracing::instrument(name = "Delete review", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    let mut tx = pool.begin().await.map_err(write_error)?;

    let star_rate = sqlx::query_scalar::<_, i32>(
        r#"DELETE FROM review WHERE id = $1 RETURNING star_rate"#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(write_error)?;

    let Some(star_rate) = star_rate else {
        return Ok(false);
    };

    sqlx::query::<sqlx::Postgres>(
        r#"
        UPDATE product
        SET
            review_ids = array_remove(review_ids, $1),
            star_rate_sum = star_rate_sum - $2,
            review_count = review_count - 1
        WHERE $1 = ANY(review_ids)
        "#,
    )
    .bind(id)
    .bind(star_rate)
    .execute(&mut *tx)
    .await
    .map_err(write_error)?;

    tx.commit().await.map_err(write_error)?;
    tracing::info!("Review {} deleted", id);

    Ok(true)
}
