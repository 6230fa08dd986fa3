use crate::configuration::Settings;
use crate::connectors::image_store::object_key;
use crate::connectors::ImageStore;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::product::{read_form, remove_image};
use actix_multipart::Multipart;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add product.", skip(payload, pg_pool, image_store, settings))]
#[post("/products")]
pub async fn add(
    payload: Multipart,
    pg_pool: web::Data<PgPool>,
    image_store: web::Data<Arc<dyn ImageStore>>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let mut multipart = read_form(payload, settings.max_upload_size).await?;

    let form = forms::product::Add::try_from(&multipart)
        .map_err(|err| JsonResponse::<models::Product>::build().form_error(err.to_string()))?;
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Product>::build().form_error(errors.to_string()));
    }

    let image = multipart
        .take_file()
        .ok_or_else(|| JsonResponse::<models::Product>::build().bad_request("Product image is required"))?;
    let extension = image
        .image_extension()
        .map_err(|err| JsonResponse::<models::Product>::build().bad_request(err.to_string()))?;

    let category = db::category::fetch_small_by_name(pg_pool.get_ref(), &form.category)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<models::Product>::build()
                .bad_request(format!("Unknown category {}", form.category))
        })?;

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

    let product = form.into_model(category.id, stored.url, stored.key.clone());
    match db::product::insert(pg_pool.get_ref(), product).await {
        Ok(product) => Ok(JsonResponse::build()
            .set_id(product.id)
            .set_item(product)
            .created("Product created")),
        Err(err) => {
            remove_image(image_store.get_ref().as_ref(), &stored.key).await;
            Err(JsonResponse::<models::Product>::build().internal_server_error(err))
        }
    }
}
