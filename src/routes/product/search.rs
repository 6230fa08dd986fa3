use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Search products.", skip(pg_pool))]
#[get("/searchproducts")]
pub async fn search(
    query: web::Query<forms::product::Search>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let query = query.into_inner();
    db::product::search(pg_pool.get_ref(), query.keyword.trim(), query.page())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}
