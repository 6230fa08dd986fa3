use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;

/// Echoes back the cart entries that still point at an existing product.
#[tracing::instrument(name = "Check cart products.", skip(pg_pool))]
#[post("/carts")]
pub async fn check(form: web::Json<forms::product::Cart>, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let cart = form.into_inner();
    let existing = db::product::fetch_existing_short_ids(pg_pool.get_ref(), &cart.ids())
        .await
        .map_err(|err| JsonResponse::<forms::product::CartItem>::build().internal_server_error(err))?;

    Ok(JsonResponse::build()
        .set_list(cart.retain_existing(&existing))
        .ok("OK"))
}
