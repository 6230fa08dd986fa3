pub mod add;
pub mod cart;
pub mod category;
pub mod delete;
pub mod get;
pub mod search;
pub mod update;

use crate::connectors::ImageStore;
use crate::helpers::multipart::{self, MultipartForm};
use crate::helpers::JsonResponse;
use crate::models;
use actix_multipart::Multipart;

/// Multipart part carrying the product image.
pub(crate) const IMAGE_FIELD: &str = "img";
/// Text parts read by the create and update forms.
const TEXT_FIELDS: &[&str] = &["name", "price", "description", "inventory", "company", "Scategory"];

pub(crate) async fn read_form(
    payload: Multipart,
    max_size: usize,
) -> Result<MultipartForm, actix_web::Error> {
    multipart::read(payload, TEXT_FIELDS, IMAGE_FIELD, max_size)
        .await
        .map_err(|err| {
            tracing::debug!("Rejected multipart payload: {}", err);
            JsonResponse::<models::Product>::build().bad_request(err.to_string())
        })
}

/// Removes an image from storage, returning whether it is gone.
/// Failures are logged and never abort the request.
pub(crate) async fn remove_image(image_store: &dyn ImageStore, key: &str) -> bool {
    if key.is_empty() {
        return true;
    }

    match image_store.delete(key).await {
        Ok(()) => {
            tracing::info!("Image {} removed from storage", key);
            true
        }
        Err(err) => {
            tracing::error!("Failed to remove image {}: {}", key, err);
            false
        }
    }
}
