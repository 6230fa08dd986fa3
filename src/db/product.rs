use crate::helpers::Page;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

const RANKED_ORDER: &str = "ORDER BY p.sales_count DESC, p.created_at DESC, p.id DESC";
const NEWEST_ORDER: &str = "ORDER BY p.created_at DESC, p.id DESC";

const CATEGORIZED_SELECT: &str = r#"SELECT
        p.*,
        b.name AS big_category_name,
        s.name AS small_category_name
    FROM product p
    JOIN small_category s ON s.id = p.category_id
    JOIN big_category b ON b.id = s.big_category_id"#;

fn fetch_error(err: sqlx::Error) -> String {
    tracing::error!("Failed to fetch products, error: {:?}", err);
    "Could not fetch data".to_string()
}

/// `ILIKE` pattern matching `keyword` anywhere, with wildcards escaped.
pub(crate) fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch all products.");
    sqlx::query_as::<_, models::Product>(r#"SELECT * FROM product ORDER BY id"#)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(fetch_error)
}

pub async fn fetch_best(pool: &PgPool, limit: i64) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch best selling products.", limit);
    sqlx::query_as::<_, models::Product>(&format!(
        "SELECT p.* FROM product p {} LIMIT $1",
        RANKED_ORDER
    ))
    .bind(limit)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn fetch_by_short_id(
    pool: &PgPool,
    short_id: &str,
) -> Result<Option<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch product by short id.", short_id = %short_id);
    sqlx::query_as::<_, models::Product>(r#"SELECT * FROM product WHERE short_id = $1 LIMIT 1"#)
        .bind(short_id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(fetch_error)
}

pub async fn fetch_review_summary(
    pool: &PgPool,
    short_id: &str,
) -> Result<Option<models::ReviewSummary>, String> {
    let query_span = tracing::info_span!("Fetch product rating aggregate.", short_id = %short_id);
    sqlx::query_as::<_, models::ReviewSummary>(
        r#"SELECT short_id, star_rate_sum, review_count, review_ids
        FROM product
        WHERE short_id = $1
        LIMIT 1"#,
    )
    .bind(short_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn search(
    pool: &PgPool,
    keyword: &str,
    page: Page,
) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Search products by name.", keyword = %keyword, page = page.page);
    sqlx::query_as::<_, models::Product>(&format!(
        "SELECT p.* FROM product p WHERE p.name ILIKE $1 {} OFFSET $2 LIMIT $3",
        NEWEST_ORDER
    ))
    .bind(like_pattern(keyword))
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn fetch_ranked(pool: &PgPool) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch ranked products.");
    sqlx::query_as::<_, models::Product>(&format!("SELECT p.* FROM product p {}", RANKED_ORDER))
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(fetch_error)
}

pub async fn fetch_newest(pool: &PgPool) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch newest products.");
    sqlx::query_as::<_, models::Product>(&format!("SELECT p.* FROM product p {}", NEWEST_ORDER))
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(fetch_error)
}

pub async fn fetch_ranked_page(pool: &PgPool, page: Page) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch page of ranked products.", page = page.page);
    sqlx::query_as::<_, models::Product>(&format!(
        "SELECT p.* FROM product p {} OFFSET $1 LIMIT $2",
        RANKED_ORDER
    ))
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn fetch_newest_page(pool: &PgPool, page: Page) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch page of newest products.", page = page.page);
    sqlx::query_as::<_, models::Product>(&format!(
        "SELECT p.* FROM product p {} OFFSET $1 LIMIT $2",
        NEWEST_ORDER
    ))
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn fetch_newest_with_category(
    pool: &PgPool,
) -> Result<Vec<models::CategorizedProduct>, String> {
    let query_span = tracing::info_span!("Fetch newest products with category names.");
    sqlx::query_as::<_, models::CategorizedProduct>(&format!(
        "{} {}",
        CATEGORIZED_SELECT, NEWEST_ORDER
    ))
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

/// Newest product of every given big category, in the order of `categories`.
/// Categories without products are skipped.
pub async fn fetch_latest_per_big_category(
    pool: &PgPool,
    categories: &[models::BigCategory],
) -> Result<Vec<models::CategorizedProduct>, String> {
    let ids: Vec<i32> = categories.iter().map(|category| category.id).collect();
    let query_span = tracing::info_span!("Fetch latest product per big category.");
    let mut latest = sqlx::query_as::<_, models::CategorizedProduct>(
        r#"SELECT DISTINCT ON (s.big_category_id)
            p.*,
            b.name AS big_category_name,
            s.name AS small_category_name
        FROM product p
        JOIN small_category s ON s.id = p.category_id
        JOIN big_category b ON b.id = s.big_category_id
        WHERE s.big_category_id = ANY($1)
        ORDER BY s.big_category_id, p.created_at DESC, p.id DESC"#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)?;

    latest.sort_by_key(|row| {
        categories
            .iter()
            .position(|category| category.name == row.big_category_name)
            .unwrap_or(usize::MAX)
    });

    Ok(latest)
}

pub async fn fetch_category_name(
    pool: &PgPool,
    short_id: &str,
) -> Result<Option<models::CategoryNames>, String> {
    let query_span = tracing::info_span!("Fetch category names of a product.", short_id = %short_id);
    sqlx::query_as::<_, models::CategoryNames>(
        r#"SELECT b.name AS big_category_name, s.name AS small_category_name
        FROM product p
        JOIN small_category s ON s.id = p.category_id
        JOIN big_category b ON b.id = s.big_category_id
        WHERE p.short_id = $1
        LIMIT 1"#,
    )
    .bind(short_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn fetch_by_small_category(
    pool: &PgPool,
    category_id: i32,
) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch products of small category.", category_id);
    sqlx::query_as::<_, models::Product>(&format!(
        "SELECT p.* FROM product p WHERE p.category_id = $1 {}",
        NEWEST_ORDER
    ))
    .bind(category_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn fetch_by_big_category(
    pool: &PgPool,
    category_id: i32,
) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch products of big category.", category_id);
    sqlx::query_as::<_, models::Product>(&format!(
        r#"SELECT p.* FROM product p
        JOIN small_category s ON s.id = p.category_id
        WHERE s.big_category_id = $1 {}"#,
        NEWEST_ORDER
    ))
    .bind(category_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn fetch_small_category_page(
    pool: &PgPool,
    category_id: i32,
    page: Page,
) -> Result<Vec<models::Product>, String> {
    let query_span =
        tracing::info_span!("Fetch page of small category products.", category_id, page = page.page);
    sqlx::query_as::<_, models::Product>(&format!(
        "SELECT p.* FROM product p WHERE p.category_id = $1 {} OFFSET $2 LIMIT $3",
        NEWEST_ORDER
    ))
    .bind(category_id)
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

pub async fn fetch_big_category_page(
    pool: &PgPool,
    category_id: i32,
    page: Page,
) -> Result<Vec<models::Product>, String> {
    let query_span =
        tracing::info_span!("Fetch page of big category products.", category_id, page = page.page);
    sqlx::query_as::<_, models::Product>(&format!(
        r#"SELECT p.* FROM product p
        JOIN small_category s ON s.id = p.category_id
        WHERE s.big_category_id = $1 {} OFFSET $2 LIMIT $3"#,
        NEWEST_ORDER
    ))
    .bind(category_id)
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(fetch_error)
}

/// Short ids out of `short_ids` that belong to an existing product.
pub async fn fetch_existing_short_ids(
    pool: &PgPool,
    short_ids: &[String],
) -> Result<Vec<String>, String> {
    if short_ids.is_empty() {
        return Ok(vec![]);
    }

    let query_span = tracing::info_span!("Check products existence.", count = short_ids.len());
    sqlx::query_scalar::<_, String>(r#"SELECT short_id FROM product WHERE short_id = ANY($1)"#)
        .bind(short_ids)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(fetch_error)
}

pub async fn insert(pool: &PgPool, mut product: models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Saving new product into the database");
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO product (
            short_id,
            name,
            price,
            description,
            inventory,
            company,
            category_id,
            image_url,
            image_key,
            star_rate_sum,
            review_count,
            review_ids,
            sales_count,
            created_at,
            updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, 0, '{}', 0, $10, $11)
        RETURNING id
        "#,
    )
    .bind(&product.short_id)
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(product.inventory)
    .bind(&product.company)
    .bind(product.category_id)
    .bind(&product.image_url)
    .bind(&product.image_key)
    .bind(product.created_at)
    .bind(product.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })?;

    product.id = id;
    product.star_rate_sum = 0;
    product.review_count = 0;
    product.review_ids = vec![];
    product.sales_count = 0;
    tracing::info!("New product {} have been saved to database", product.short_id);

    Ok(product)
}

/// Writes the editable columns. The rating aggregate is owned by `db::review`
/// and is left untouched here.
pub async fn update(pool: &PgPool, product: models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Updating product", short_id = %product.short_id);
    sqlx::query_as::<_, models::Product>(
        r#"
        UPDATE product
        SET
            name=$2,
            price=$3,
            description=$4,
            inventory=$5,
            company=$6,
            category_id=$7,
            image_url=$8,
            image_key=$9,
            updated_at=NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(product.inventory)
    .bind(&product.company)
    .bind(product.category_id)
    .bind(&product.image_url)
    .bind(&product.image_key)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|product| {
        tracing::info!("Product {} have been saved", product.short_id);
        product
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Could not update product".to_string()
    })
}

/// Returns the image key of the removed row, `None` when nothing matched.
/// Linked reviews and order line items are kept.
#[tracing::instrument(name = "Delete product by short id.", skip(pool))]
pub async fn delete_by_short_id(pool: &PgPool, short_id: &str) -> Result<Option<String>, String> {
    sqlx::query_scalar::<_, String>("DELETE FROM product WHERE short_id = $1 RETURNING image_key;")
        .bind(short_id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete product: {:?}", err);
            "Failed to delete product".to_string()
        })
}

/// Image keys of every removed product.
#[tracing::instrument(name = "Delete all products.", skip(pool))]
pub async fn delete_all(pool: &PgPool) -> Result<Vec<String>, String> {
    sqlx::query_scalar::<_, String>("DELETE FROM product RETURNING image_key;")
        .fetch_all(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete products: {:?}", err);
            "Failed to delete products".to_string()
        })
}
