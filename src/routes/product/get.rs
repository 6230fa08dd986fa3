use crate::db;
use crate::helpers::{JsonResponse, Page};
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

const BEST_LIMIT: i64 = 8;

fn fetch_failed(err: String) -> actix_web::Error {
    JsonResponse::<models::Product>::build().internal_server_error(err)
}

#[tracing::instrument(name = "Get best products.", skip(pg_pool))]
#[get("/bestproducts")]
pub async fn best(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::product::fetch_best(pg_pool.get_ref(), BEST_LIMIT)
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(fetch_failed)
}

#[tracing::instrument(name = "Get ranked products.", skip(pg_pool))]
#[get("/rankedproducts")]
pub async fn ranked(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::product::fetch_ranked(pg_pool.get_ref())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(fetch_failed)
}

#[tracing::instrument(name = "Get newest products.", skip(pg_pool))]
#[get("/newestproducts")]
pub async fn newest(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::product::fetch_newest(pg_pool.get_ref())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(fetch_failed)
}

#[tracing::instrument(name = "Get next ranked products.", skip(pg_pool))]
#[get("/rankednextproducts")]
pub async fn ranked_page(
    query: web::Query<Page>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::product::fetch_ranked_page(pg_pool.get_ref(), query.into_inner())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(fetch_failed)
}

#[tracing::instrument(name = "Get next newest products.", skip(pg_pool))]
#[get("/newestnextproducts")]
pub async fn newest_page(
    query: web::Query<Page>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::product::fetch_newest_page(pg_pool.get_ref(), query.into_inner())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(fetch_failed)
}

/// Unknown short ids answer with an empty envelope rather than 404.
#[tracing::instrument(name = "Get product.", skip(pg_pool))]
#[get("/product/{product_id}")]
pub async fn item(path: web::Path<(String,)>, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let product_id = path.into_inner().0;
    let product = db::product::fetch_by_short_id(pg_pool.get_ref(), &product_id)
        .await
        .map_err(fetch_failed)?;

    Ok(match product {
        Some(product) => JsonResponse::build().set_item(product).ok("OK"),
        None => JsonResponse::<models::Product>::build().ok("Product not found"),
    })
}

#[tracing::instrument(name = "Get all products.", skip(pg_pool))]
#[get("/allproducts")]
pub async fn list(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::product::fetch_all(pg_pool.get_ref())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(fetch_failed)
}

#[tracing::instrument(name = "Get products with category.", skip(pg_pool))]
#[get("/productswithcategory")]
pub async fn with_category(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::product::fetch_newest_with_category(pg_pool.get_ref())
        .await
        .map(|rows| {
            let products = rows
                .into_iter()
                .map(views::product::ProductWithCategory::from)
                .collect();
            JsonResponse::build().set_list(products).ok("OK")
        })
        .map_err(fetch_failed)
}

#[tracing::instrument(name = "Get latest product of each category.", skip(pg_pool))]
#[get("/categorylatestproduct")]
pub async fn category_latest(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let categories = db::category::fetch_all_big(pg_pool.get_ref())
        .await
        .map_err(fetch_failed)?;

    db::product::fetch_latest_per_big_category(pg_pool.get_ref(), &categories)
        .await
        .map(|rows| {
            let latest = rows
                .into_iter()
                .map(views::product::CategoryLatest::from)
                .collect();
            JsonResponse::build().set_list(latest).ok("OK")
        })
        .map_err(fetch_failed)
}

#[tracing::instrument(name = "Get category name of product.", skip(pg_pool))]
#[get("/categoryname/{product_id}")]
pub async fn category_name(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let product_id = path.into_inner().0;
    db::product::fetch_category_name(pg_pool.get_ref(), &product_id)
        .await
        .map_err(fetch_failed)?
        .map(|names| {
            JsonResponse::build()
                .set_item(views::product::CategoryName::from(names))
                .ok("OK")
        })
        .ok_or_else(|| {
            JsonResponse::<views::product::CategoryName>::build().not_found("Product not found")
        })
}
