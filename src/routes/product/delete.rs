use crate::connectors::ImageStore;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::product::remove_image;
use crate::views;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Deleting a product that is already gone succeeds with `deleted: false`.
#[tracing::instrument(name = "Delete product.", skip(pg_pool, image_store))]
#[delete("/products")]
pub async fn item(
    form: web::Json<forms::product::Delete>,
    pg_pool: web::Data<PgPool>,
    image_store: web::Data<Arc<dyn ImageStore>>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    let removed_key = db::product::delete_by_short_id(pg_pool.get_ref(), &form.product_id)
        .await
        .map_err(|err| JsonResponse::<views::product::Removed>::build().internal_server_error(err))?;

    let deleted = removed_key.is_some();
    let image_key = removed_key.or(form.image_key).unwrap_or_default();
    let image_deleted = remove_image(image_store.get_ref().as_ref(), &image_key).await;

    Ok(JsonResponse::build()
        .set_item(views::product::Removed::new(form.product_id, deleted, image_deleted))
        .ok("Product deleted"))
}

#[tracing::instrument(name = "Delete all products.", skip(pg_pool, image_store))]
#[delete("/allproducts")]
pub async fn list(
    pg_pool: web::Data<PgPool>,
    image_store: web::Data<Arc<dyn ImageStore>>,
) -> Result<impl Responder> {
    let image_keys = db::product::delete_all(pg_pool.get_ref())
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?;

    let mut orphaned = 0;
    for key in &image_keys {
        if !remove_image(image_store.get_ref().as_ref(), key).await {
            orphaned += 1;
        }
    }
    if orphaned > 0 {
        tracing::warn!("{} product images could not be removed", orphaned);
    }

    Ok(JsonResponse::<models::Product>::build()
        .ok(format!("{} products deleted", image_keys.len())))
}
