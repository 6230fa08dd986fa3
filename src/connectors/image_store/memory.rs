use super::{ImageStore, StoredImage};
use crate::configuration::StorageSettings;
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct InMemoryImageStore {
    settings: StorageSettings,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStore {
    pub fn new(settings: &StorageSettings) -> Self {
        Self {
            settings: settings.clone(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .lock()
            .map(|objects| objects.contains_key(key))
            .unwrap_or(false)
    }

    fn lock_error() -> ConnectorError {
        ConnectorError::Internal("image store lock poisoned".to_string())
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload(
        &self,
        key: &str,
        _content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<StoredImage, ConnectorError> {
        self.objects
            .lock()
            .map_err(|_| Self::lock_error())?
            .insert(key.to_string(), bytes);

        Ok(StoredImage {
            url: self.settings.object_url(key),
            key: key.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), ConnectorError> {
        self.objects
            .lock()
            .map_err(|_| Self::lock_error())?
            .remove(key);
        Ok(())
    }
}
