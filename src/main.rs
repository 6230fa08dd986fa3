use std::net::TcpListener;
use storefront::configuration::get_configuration;
use storefront::startup::{get_connection_pool, run};
use storefront::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_subscriber(get_subscriber("storefront".into(), "info".into()));

    let settings = get_configuration().map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Failed to read configuration: {err}"),
        )
    })?;

    tracing::info!(
        db_host = %settings.database.host,
        db_name = %settings.database.database_name,
        storage_enabled = settings.storage.enabled,
        "Starting storefront"
    );

    let pg_pool = get_connection_pool(&settings.database).await.map_err(|err| {
        tracing::error!("Failed to connect to database: {:?}", err);
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, err.to_string())
    })?;

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Start server at {:?}", &address);

    run(listener, pg_pool, settings).await?.await
}
