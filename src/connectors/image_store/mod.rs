mod memory;
mod s3;

pub use memory::InMemoryImageStore;
pub use s3::S3ImageStore;

use crate::configuration::StorageSettings;
use crate::connectors::ConnectorError;
use actix_web::web;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Where an uploaded image ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub url: String,
    pub key: String,
}

/// Object storage for product images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(
        &self,
        key: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<StoredImage, ConnectorError>;

    /// Removing a key that does not exist is not an error.
    async fn delete(&self, key: &str) -> Result<(), ConnectorError>;
}

/// `products/{uuid}.{extension}`
pub fn object_key(extension: &str) -> String {
    format!("products/{}.{}", Uuid::new_v4(), extension)
}

/// Uses S3 when storage is enabled; otherwise images are kept in memory.
pub async fn init(settings: &StorageSettings) -> web::Data<Arc<dyn ImageStore>> {
    let store: Arc<dyn ImageStore> = if settings.enabled {
        let store = S3ImageStore::new(settings).await;
        tracing::info!("S3 image store initialized (bucket {})", settings.bucket);
        Arc::new(store)
    } else {
        tracing::warn!("Object storage disabled - using in-memory image store");
        Arc::new(InMemoryImageStore::new(settings))
    };

    web::Data::new(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_are_unique_and_scoped() {
        let a = object_key("png");
        let b = object_key("png");
        assert!(a.starts_with("products/"));
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn disabled_storage_falls_back_to_memory() {
        let settings = StorageSettings {
            enabled: false,
            bucket: "unused".to_string(),
            region: None,
            public_url: "http://localhost/images".to_string(),
        };
        let store = init(&settings).await;
        let stored = store
            .upload("products/a.png", Some("image/png"), vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(stored.url, "http://localhost/images/products/a.png");
    }
}
