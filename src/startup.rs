use crate::configuration::{DatabaseSettings, Settings};
use crate::connectors::{self, ImageStore};
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, middleware as actix_middleware, web, App, HttpServer};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

pub async fn get_connection_pool(settings: &DatabaseSettings) -> Result<Pool<Postgres>, sqlx::Error> {
    let connect_options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.username)
        .password(&settings.password)
        .database(&settings.database_name)
        .ssl_mode(PgSslMode::Disable);

    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(connect_options)
        .await
}

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let image_store = connectors::init_image_store(&settings.storage).await;
    run_with_image_store(listener, pg_pool, settings, image_store).await
}

/// Same as [`run`] with an already built image store.
pub async fn run_with_image_store(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
    image_store: web::Data<Arc<dyn ImageStore>>,
) -> Result<Server, std::io::Error> {
    let pages = routes::login::Pages::new()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, format!("{err:?}")))?;
    let pages = web::Data::new(pages);

    let authorization =
        middleware::authorization::try_new(settings.database.connection_string()).await?;

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => serde_json::json!({
                "message": "Invalid JSON payload",
                "kind": "deserialize",
                "line": err.line(),
                "column": err.column(),
                "msg": err.to_string(),
            })
            .to_string(),
            _ => serde_json::json!({
                "message": "Invalid JSON payload",
                "kind": "other",
                "msg": err.to_string(),
            })
            .to_string(),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(authorization.clone())
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_middleware::Compress::default())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(web::scope("/login").service(routes::login::page))
            .service(
                web::scope("/api")
                    .service(routes::product::get::best)
                    .service(routes::product::get::ranked)
                    .service(routes::product::get::newest)
                    .service(routes::product::get::ranked_page)
                    .service(routes::product::get::newest_page)
                    .service(routes::product::get::item)
                    .service(routes::product::get::list)
                    .service(routes::product::get::with_category)
                    .service(routes::product::get::category_latest)
                    .service(routes::product::get::category_name)
                    .service(routes::product::search::search)
                    .service(routes::product::category::list)
                    .service(routes::product::category::page)
                    .service(routes::product::cart::check)
                    .service(routes::product::add::add)
                    .service(routes::product::update::item)
                    .service(routes::product::delete::item)
                    .service(routes::product::delete::list)
                    .service(routes::review::get::for_product)
                    .service(routes::review::get::by_author)
                    .service(routes::review::add::add)
                    .service(routes::review::edit::item)
                    .service(routes::review::delete::item),
            )
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(image_store.clone())
            .app_data(pages.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
