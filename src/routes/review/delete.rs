use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::review::edit::fetch_own;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Delete review.", skip(pg_pool))]
#[delete("/reviews")]
pub async fn item(
    query: web::Query<forms::review::ReviewQuery>,
    user: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let review = fetch_own(pg_pool.get_ref(), &user, query.review_id).await?;

    let deleted = db::review::delete(pg_pool.get_ref(), review.id)
        .await
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?;
    if !deleted {
        return Err(JsonResponse::<models::Review>::build().not_found("Review not found"));
    }

    Ok(JsonResponse::<models::Review>::build()
        .set_id(review.id)
        .ok("Review deleted"))
}
