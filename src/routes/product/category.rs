use crate::db;
use crate::helpers::{JsonResponse, Page};
use crate::models::{self, CategoryScope};
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

fn fetch_failed(err: String) -> actix_web::Error {
    JsonResponse::<models::Product>::build().internal_server_error(err)
}

/// Products of a small category, or of every small category under a big one.
#[tracing::instrument(name = "Get products of category.", skip(pg_pool))]
#[get("/productlist/{category}")]
pub async fn list(path: web::Path<(String,)>, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let category = path.into_inner().0;
    let pool = pg_pool.get_ref();

    let products = match db::category::resolve(pool, &category).await.map_err(fetch_failed)? {
        Some(CategoryScope::Small(small)) => db::product::fetch_by_small_category(pool, small.id).await,
        Some(CategoryScope::Big(big)) => db::product::fetch_by_big_category(pool, big.id).await,
        None => Ok(vec![]),
    }
    .map_err(fetch_failed)?;

    Ok(JsonResponse::build().set_list(products).ok("OK"))
}

#[tracing::instrument(name = "Get next products of category.", skip(pg_pool))]
#[get("/categorynext8products/{category}")]
pub async fn page(
    path: web::Path<(String,)>,
    query: web::Query<Page>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let category = path.into_inner().0;
    let page = query.into_inner();
    let pool = pg_pool.get_ref();

    let products = match db::category::resolve(pool, &category).await.map_err(fetch_failed)? {
        Some(CategoryScope::Small(small)) => {
            db::product::fetch_small_category_page(pool, small.id, page).await
        }
        Some(CategoryScope::Big(big)) => db::product::fetch_big_category_page(pool, big.id, page).await,
        None => Ok(vec![]),
    }
    .map_err(fetch_failed)?;

    Ok(JsonResponse::build().set_list(products).ok("OK"))
}
