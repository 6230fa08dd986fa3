use crate::configuration::Settings;
use crate::connectors::image_store::object_key;
use crate::connectors::ImageStore;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::product::{read_form, remove_image};
use crate::views;
use actix_multipart::Multipart;
use actix_web::{patch, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// Applies only the fields that were sent. A new `img` replaces the stored
/// image; the old one is removed once the row is saved.
#[tracing::instrument(name = "Update product.", skip(payload, pg_pool, image_store, settings))]
#[patch("/products/{product_id}")]
pub async fn item(
    path: web::Path<(String,)>,
    payload: Multipart,
    pg_pool: web::Data<PgPool>,
    image_store: web::Data<Arc<dyn ImageStore>>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let product_id = path.into_inner().0;
    let mut multipart = read_form(payload, settings.max_upload_size).await?;

    let form = forms::product::Patch::try_from(&multipart)
        .map_err(|err| JsonResponse::<models::Product>::build().form_error(err.to_string()))?;
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Product>::build().form_error(errors.to_string()));
    }

    let image = multipart.take_file();
    if form.is_empty() && image.is_none() {
        return Err(JsonResponse::<models::Product>::build().bad_request("Nothing to update"));
    }

    let mut product = db::product::fetch_by_short_id(pg_pool.get_ref(), &product_id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    let category_id = match form.category.as_deref() {
        Some(name) => {
            let category = db::category::fetch_small_by_name(pg_pool.get_ref(), name)
                .await
                .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
                .ok_or_else(|| {
                    JsonResponse::<models::Product>::build()
                        .bad_request(format!("Unknown category {}", name))
                })?;
            Some(category.id)
        }
        None => None,
    };

    let previous_key = product.image_key.clone();
    let replaced = match image {
        Some(image) => {
            let extension = image
                .image_extension()
                .map_err(|err| JsonResponse::<models::Product>::build().bad_request(err.to_string()))?;
            let stored = image_store
                .upload(
                    &object_key(&extension),
                    image.content_type.as_deref(),
                    image.bytes,
                )
                .await
                .map_err(|err| {
                    tracing::error!("Image upload failed: {}", err);
                    actix_web::Error::from(err)
                })?;
            product.image_url = stored.url;
            product.image_key = stored.key;
            true
        }
        None => false,
    };

    form.update(&mut product, category_id);
    tracing::debug!("Updating product {}", product.short_id);

    let new_key = product.image_key.clone();
    let product = match db::product::update(pg_pool.get_ref(), product).await {
        Ok(product) => product,
        Err(err) => {
            if replaced {
                remove_image(image_store.get_ref().as_ref(), &new_key).await;
            }
            return Err(JsonResponse::<models::Product>::build().internal_server_error(err));
        }
    };

    let image_deleted = if replaced {
        Some(remove_image(image_store.get_ref().as_ref(), &previous_key).await)
    } else {
        None
    };

    Ok(JsonResponse::build()
        .set_item(views::product::Updated::new(product, image_deleted))
        .ok("Product updated"))
}
