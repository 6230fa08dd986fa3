use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Average rating of a product plus its review feed, oldest first.
#[tracing::instrument(name = "Get reviews of product.", skip(pg_pool))]
#[get("/reviews/{product_id}")]
pub async fn for_product(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let product_id = path.into_inner().0;
    let summary = db::product::fetch_review_summary(pg_pool.get_ref(), &product_id)
        .await
        .map_err(|err| JsonResponse::<views::review::ProductReviews>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<views::review::ProductReviews>::build().not_found("Product not found"))?;

    if !summary.has_reviews() {
        return Ok(JsonResponse::build()
            .set_item(views::review::ProductReviews::empty())
            .ok("OK"));
    }

    let reviews = db::review::fetch_by_ids(pg_pool.get_ref(), &summary.review_ids)
        .await
        .map_err(|err| JsonResponse::<views::review::ProductReviews>::build().internal_server_error(err))?;

    Ok(JsonResponse::build()
        .set_item(views::review::ProductReviews::new(&summary, reviews))
        .ok("OK"))
}

#[tracing::instrument(name = "Get reviews of author.", skip(pg_pool))]
#[get("/reviewsByAuthor")]
pub async fn by_author(
    user: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::review::fetch_by_author(pg_pool.get_ref(), &user.id)
        .await
        .map(|reviews| JsonResponse::build().set_list(reviews).ok("OK"))
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))
}
