use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{patch, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// Loads a review the caller is allowed to change: its author or an admin.
pub(crate) async fn fetch_own(
    pool: &PgPool,
    user: &models::User,
    review_id: i32,
) -> Result<models::Review> {
    let review = db::review::fetch(pool, review_id)
        .await
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Review>::build().not_found("Review not found"))?;

    if !review.is_authored_by(&user.id) && !user.is_admin() {
        return Err(JsonResponse::<models::Review>::build().forbidden("Not the author of this review"));
    }

    Ok(review)
}

#[tracing::instrument(name = "Edit review.", skip(pg_pool))]
#[patch("/reviews")]
pub async fn item(
    query: web::Query<forms::review::ReviewQuery>,
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::review::Edit>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Review>::build().form_error(errors.to_string()));
    }
    if form.is_empty() {
        return Err(JsonResponse::<models::Review>::build().bad_request("Nothing to update"));
    }

    let mut review = fetch_own(pg_pool.get_ref(), &user, query.review_id).await?;
    form.into_inner().update(&mut review);

    let review = db::review::update(pg_pool.get_ref(), review)
        .await
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Review>::build().not_found("Review not found"))?;

    Ok(JsonResponse::build().set_item(review).ok("Review updated"))
}
