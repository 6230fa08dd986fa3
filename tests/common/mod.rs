#![allow(dead_code)]

use actix_web::web;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::Arc;
use storefront::configuration::{get_configuration, DatabaseSettings, Settings};
use storefront::connectors::ImageStore;
use storefront::models;
use storefront::startup;

pub const ADMIN: &str = "group_admin";
pub const USER: &str = "group_user";
const JWT_SECRET: &str = "storefront-test-secret";

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub jwt_secret: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Bearer token signed with the secret the app verifies against.
    pub fn token(&self, user_id: &str, role: &str) -> String {
        sign_jwt(
            &self.jwt_secret,
            json!({
                "sub": user_id,
                "name": format!("user {}", user_id),
                "email": format!("{}@test.com", user_id),
                "role": role,
                "exp": (Utc::now() + Duration::minutes(30)).timestamp(),
            }),
        )
    }
}

pub fn sign_jwt(secret: &str, claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign JWT")
}

pub async fn spawn_app_with_configuration(configuration: Settings) -> Option<TestApp> {
    spawn(configuration, None).await
}

/// App whose image uploads and deletes go through `image_store`.
pub async fn spawn_app_with_image_store(image_store: Arc<dyn ImageStore>) -> Option<TestApp> {
    spawn(test_configuration(), Some(image_store)).await
}

async fn spawn(
    mut configuration: Settings,
    image_store: Option<Arc<dyn ImageStore>>,
) -> Option<TestApp> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();
    configuration.storage.enabled = false;
    let jwt_secret = configuration.auth.jwt_secret.clone();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    // the policy reloader needs an actix system
    std::env::set_var("STOREFRONT_CASBIN_RELOAD_ENABLED", "false");

    let pool = connection_pool.clone();
    let server = match image_store {
        Some(image_store) => {
            startup::run_with_image_store(listener, pool, configuration, web::Data::new(image_store))
                .await
        }
        None => startup::run(listener, pool, configuration).await,
    }
    .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        jwt_secret,
    })
}

fn test_configuration() -> Settings {
    // configuration.yaml ships without a secret
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", JWT_SECRET);
    }
    get_configuration().expect("Failed to get configuration")
}

pub async fn spawn_app() -> Option<TestApp> {
    spawn_app_with_configuration(test_configuration()).await
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await?;

    Ok(connection_pool)
}

/// Returns the small category id, creating the big one on first use.
pub async fn seed_category(pool: &PgPool, big: &str, small: &str) -> i32 {
    let big_id: i32 = sqlx::query_scalar(
        r#"INSERT INTO big_category (name) VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id"#,
    )
    .bind(big)
    .fetch_one(pool)
    .await
    .expect("Failed to insert big category");

    sqlx::query_scalar(
        r#"INSERT INTO small_category (name, big_category_id) VALUES ($1, $2) RETURNING id"#,
    )
    .bind(small)
    .bind(big_id)
    .fetch_one(pool)
    .await
    .expect("Failed to insert small category")
}

/// Inserts a product `age_minutes` old, bypassing the admin route.
pub async fn seed_product(
    pool: &PgPool,
    category_id: i32,
    name: &str,
    sales_count: i32,
    age_minutes: i64,
) -> models::Product {
    let created_at = Utc::now() - Duration::minutes(age_minutes);
    sqlx::query_as::<_, models::Product>(
        r#"INSERT INTO product (
            short_id, name, price, description, inventory, company, category_id,
            image_url, image_key, sales_count, created_at, updated_at
        )
        VALUES ($1, $2, 1000, '', 10, 'ACME', $3, $4, $5, $6, $7, $7)
        RETURNING *"#,
    )
    .bind(models::generate_short_id())
    .bind(name)
    .bind(category_id)
    .bind(format!("http://localhost/images/products/{}.png", name))
    .bind(format!("products/{}.png", name))
    .bind(sales_count)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .expect("Failed to insert product")
}

/// Records an order by `buyer` containing `product_id`.
pub async fn seed_order(pool: &PgPool, buyer: &str, product_id: i32) {
    let order_id: i32 = sqlx::query_scalar(r#"INSERT INTO orders (buyer) VALUES ($1) RETURNING id"#)
        .bind(buyer)
        .fetch_one(pool)
        .await
        .expect("Failed to insert order");

    sqlx::query(r#"INSERT INTO ordered_product (order_id, product_id, quantity) VALUES ($1, $2, 1)"#)
        .bind(order_id)
        .bind(product_id)
        .execute(pool)
        .await
        .expect("Failed to insert ordered product");
}
