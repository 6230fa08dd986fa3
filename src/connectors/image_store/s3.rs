use super::{ImageStore, StoredImage};
use crate::configuration::StorageSettings;
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

pub struct S3ImageStore {
    client: S3Client,
    settings: StorageSettings,
}

fn map_sdk_error<E, R>(err: SdkError<E, R>) -> ConnectorError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let details = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            ConnectorError::ServiceUnavailable(details)
        }
        _ => ConnectorError::HttpError(details),
    }
}

impl S3ImageStore {
    pub async fn new(settings: &StorageSettings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = settings.region.clone() {
            loader = loader.region(aws_config::Region::new(region));
        }
        let aws_config = loader.load().await;

        Self {
            client: S3Client::new(&aws_config),
            settings: settings.clone(),
        }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    #[tracing::instrument(name = "Upload image to S3", skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(
        &self,
        key: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<StoredImage, ConnectorError> {
        self.client
            .put_object()
            .bucket(&self.settings.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|err| {
                tracing::error!(key = %key, error = %DisplayErrorContext(&err), "S3 upload failed");
                map_sdk_error(err)
            })?;

        Ok(StoredImage {
            url: self.settings.object_url(key),
            key: key.to_string(),
        })
    }

    #[tracing::instrument(name = "Delete image from S3", skip(self))]
    async fn delete(&self, key: &str) -> Result<(), ConnectorError> {
        self.client
            .delete_object()
            .bucket(&self.settings.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(key = %key, error = %DisplayErrorContext(&err), "S3 delete failed");
                map_sdk_error(err)
            })?;

        Ok(())
    }
}
