use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::review_eligibility;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// Only users with an order containing the product may review it.
#[tracing::instrument(name = "Add review.", skip(pg_pool))]
#[post("/reviews")]
pub async fn add(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::review::Add>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Review>::build().form_error(errors.to_string()));
    }

    let product = db::product::fetch_by_short_id(pg_pool.get_ref(), &form.product_id)
        .await
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Review>::build().not_found("Product not found"))?;

    let eligible = review_eligibility::can_review(pg_pool.get_ref(), &user.id, &product)
        .await
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?;
    if !eligible {
        return Err(JsonResponse::<models::Review>::build()
            .forbidden("Only buyers of the product can review it"));
    }

    let review = form.to_model(&user);
    db::review::insert_for_product(pg_pool.get_ref(), product.id, review)
        .await
        .map(|review| {
            JsonResponse::build()
                .set_id(review.id)
                .set_item(review)
                .created("Review saved")
        })
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))
}
