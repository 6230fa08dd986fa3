use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use std::collections::HashMap;
use std::str::FromStr;

const SUPPORTED_IMAGE_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MultipartError {
    #[error("failed to read multipart payload: {0}")]
    Payload(String),
    #[error("multipart payload is larger than {0} bytes")]
    TooLarge(usize),
    #[error("field {0} is not valid utf-8")]
    Encoding(String),
    #[error("field {0} has wrong type")]
    WrongType(String),
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Lowercased extension, checked against the image formats we serve.
    pub fn image_extension(&self) -> Result<String, MultipartError> {
        let ext = std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        if SUPPORTED_IMAGE_FORMATS.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(MultipartError::UnsupportedFormat(ext))
        }
    }
}

/// Text fields and at most one file of a `multipart/form-data` request.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn string(&self, name: &str) -> Option<String> {
        self.text(name).map(ToString::to_string)
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, MultipartError> {
        match self.text(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse::<T>()
                .map(Some)
                .map_err(|_| MultipartError::WrongType(name.to_string())),
        }
    }

    pub fn take_file(&mut self) -> Option<UploadedFile> {
        self.file.take()
    }
}

/// Drains the payload. The part named `file_field` is kept as the upload,
/// parts listed in `text_fields` are read as utf-8 text and anything else
/// is discarded. `max_size` bounds the bytes of all parts together.
pub async fn read(
    mut payload: Multipart,
    text_fields: &[&str],
    file_field: &str,
    max_size: usize,
) -> Result<MultipartForm, MultipartError> {
    let mut form = MultipartForm::default();
    let mut received = 0usize;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| MultipartError::Payload(err.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let keep = name == file_field || text_fields.contains(&name.as_str());
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(ToString::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|err| MultipartError::Payload(err.to_string()))?
        {
            received += chunk.len();
            if received > max_size {
                return Err(MultipartError::TooLarge(max_size));
            }
            if keep {
                data.extend_from_slice(&chunk);
            }
        }

        if !keep {
            tracing::debug!("Ignoring multipart field {}", name);
        } else if name == file_field {
            // an empty file input still sends a part
            if data.is_empty() {
                continue;
            }
            form.file = Some(UploadedFile {
                file_name: file_name.unwrap_or_default(),
                content_type,
                bytes: data,
            });
        } else {
            let value = String::from_utf8(data).map_err(|_| MultipartError::Encoding(name.clone()))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

#[cfg(test)]
impl MultipartForm {
    pub(crate) fn from_parts(fields: &[(&str, &str)], file: Option<UploadedFile>) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file,
        }
    }
}
