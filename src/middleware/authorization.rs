use actix_casbin_auth::{
    casbin::{function_map::key_match2, CoreApi, DefaultModel},
    CasbinService,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx_adapter::SqlxAdapter;
use std::io::{Error, ErrorKind};
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

/// How often `casbin_rule` is polled for changes.
struct ReloadSettings {
    enabled: bool,
    interval: Duration,
}

impl ReloadSettings {
    fn from_env() -> Self {
        let enabled = std::env::var("STOREFRONT_CASBIN_RELOAD_ENABLED")
            .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE"))
            .unwrap_or(true);
        let interval = std::env::var("STOREFRONT_CASBIN_RELOAD_INTERVAL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(10);

        Self {
            enabled,
            interval: Duration::from_secs(interval),
        }
    }
}

fn io_error<E: std::fmt::Debug>(err: E) -> Error {
    Error::new(ErrorKind::Other, format!("{err:?}"))
}

/// Builds the RBAC guard from `access_control.conf` and the `casbin_rule` table.
pub async fn try_new(db_connection_address: String) -> Result<CasbinService, Error> {
    let model = DefaultModel::from_file("access_control.conf")
        .await
        .map_err(io_error)?;
    let adapter = SqlxAdapter::new(db_connection_address.clone(), 8)
        .await
        .map_err(io_error)?;
    let casbin_service = CasbinService::new(model, adapter)
        .await
        .map_err(io_error)?;

    // route patterns such as /api/product/:product_id
    casbin_service
        .write()
        .await
        .get_role_manager()
        .write()
        .matching_fn(Some(key_match2), None);

    let reload = ReloadSettings::from_env();
    if reload.enabled {
        let policy_pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&db_connection_address)
            .await
            .map_err(io_error)?;
        spawn_policy_reloader(casbin_service.clone(), policy_pool, reload.interval);
    }

    Ok(casbin_service)
}

fn spawn_policy_reloader(casbin_service: CasbinService, policy_pool: PgPool, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        let mut seen: Option<PolicyFingerprint> = None;

        loop {
            ticker.tick().await;

            let current = match PolicyFingerprint::fetch(&policy_pool).await {
                Ok(current) => current,
                Err(err) => {
                    warn!("Could not read casbin_rule state: {err:?}");
                    continue;
                }
            };
            if seen == Some(current) {
                continue;
            }

            if reload_policies(&casbin_service).await {
                seen = Some(current);
            }
        }
    });
}

async fn reload_policies(casbin_service: &CasbinService) -> bool {
    let Ok(mut enforcer) = casbin_service.try_write() else {
        warn!("Policy reload postponed, enforcer is busy");
        return false;
    };

    match timeout(Duration::from_millis(500), enforcer.load_policy()).await {
        Ok(Ok(())) => {
            enforcer
                .get_role_manager()
                .write()
                .matching_fn(Some(key_match2), None);
            debug!("Access policies reloaded");
            true
        }
        Ok(Err(err)) => {
            warn!("Failed to reload access policies: {err:?}");
            false
        }
        Err(_) => {
            warn!("Access policy reload timed out");
            false
        }
    }
}

/// Highest rule id and rule count; any insert or delete changes one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
struct PolicyFingerprint {
    max_id: i64,
    total: i64,
}

impl PolicyFingerprint {
    async fn fetch(pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT COALESCE(MAX(id), 0)::bigint AS max_id, COUNT(*) AS total FROM casbin_rule"#,
        )
        .fetch_one(pool)
        .await
    }
}
