use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub auth: AuthSettings,
    pub storage: StorageSettings,
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_max_upload_size() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Clone, serde::Deserialize)]
pub struct AuthSettings {
    /// HS256 secret shared with the token issuer
    pub jwt_secret: String,
    /// Endpoint of the account service the login page posts credentials to
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

fn default_login_url() -> String {
    "/api/login".to_string()
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"***")
            .field("login_url", &self.login_url)
            .finish()
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct StorageSettings {
    /// S3 is used only when enabled, otherwise images are kept in memory
    pub enabled: bool,
    pub bucket: String,
    pub region: Option<String>,
    /// Base URL the uploaded objects are served from
    pub public_url: String,
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

impl AuthSettings {
    fn apply_env(&mut self) {
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.jwt_secret = secret;
        }
    }

    /// Tokens cannot be verified without a secret, so startup stops here.
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(config::ConfigError::NotFound("JWT_SECRET".to_string()));
        }
        Ok(())
    }
}

impl StorageSettings {
    fn apply_env(&mut self) {
        if let Ok(bucket) = std::env::var("AWS_BUCKET_NAME") {
            self.bucket = bucket;
        }
        if let Ok(region) = std::env::var("AWS_REGION") {
            self.region = Some(region);
        }
        if let Ok(public_url) = std::env::var("STORAGE_PUBLIC_URL") {
            self.public_url = public_url;
        }
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url.trim_end_matches('/'), key)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize our configuration reader
    let mut settings = config::Config::default();

    // Add configuration values from a file named `configuration`
    // with the .yaml extension
    settings.merge(config::File::with_name("configuration"))?; // .json, .toml, .yaml, .yml

    // Try to convert the configuration values it read into
    // our Settings type
    let mut config: Settings = settings.try_deserialize()?;

    // Secrets and bucket coordinates may come from the environment
    config.auth.apply_env();
    config.storage.apply_env();

    config.auth.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_joins_without_double_slash() {
        let storage = StorageSettings {
            enabled: false,
            bucket: "images".to_string(),
            region: None,
            public_url: "https://cdn.example.com/".to_string(),
        };

        assert_eq!(
            storage.object_url("products/a.png"),
            "https://cdn.example.com/products/a.png"
        );
    }

    #[test]
    fn auth_settings_debug_hides_secret() {
        let auth = AuthSettings {
            jwt_secret: "very-secret".to_string(),
            login_url: default_login_url(),
        };

        assert!(!format!("{:?}", auth).contains("very-secret"));
    }

    #[test]
    fn blank_jwt_secret_is_rejected() {
        let mut auth = AuthSettings {
            jwt_secret: "  ".to_string(),
            login_url: default_login_url(),
        };
        assert!(matches!(
            auth.validate(),
            Err(config::ConfigError::NotFound(key)) if key == "JWT_SECRET"
        ));

        auth.jwt_secret = "very-secret".to_string();
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn shipped_configuration_carries_no_secret() {
        let shipped = config::Config::builder()
            .add_source(config::File::with_name("configuration"))
            .build()
            .unwrap();

        assert_eq!(shipped.get_string("auth.jwt_secret").unwrap(), "");
    }
}
