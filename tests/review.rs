mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

async fn product_summary(app: &common::TestApp, short_id: &str) -> (i32, i32, Vec<i32>) {
    sqlx::query_as::<_, (i32, i32, Vec<i32>)>(
        r#"SELECT star_rate_sum, review_count, review_ids FROM product WHERE short_id = $1"#,
    )
    .bind(short_id)
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to fetch product aggregate")
}

async fn post_review(app: &common::TestApp, token: &str, product_id: &str, star_rate: i32) -> reqwest::Response {
    reqwest::Client::new()
        .post(app.url("/api/reviews"))
        .bearer_auth(token)
        .json(&json!({"comment": "works well", "starRate": star_rate, "productId": product_id}))
        .send()
        .await
        .expect("Failed to execute request.")
}

#[tokio::test]
async fn review_requires_purchase() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let category_id = common::seed_category(&app.db_pool, "Home", "Lighting").await;
    let product = common::seed_product(&app.db_pool, category_id, "lamp", 0, 0).await;
    common::seed_order(&app.db_pool, "someone-else", product.id).await;

    let response = post_review(&app, &app.token("user-1", common::USER), &product.short_id, 5).await;
    assert_eq!(StatusCode::FORBIDDEN, response.status());

    assert_eq!(product_summary(&app, &product.short_id).await, (0, 0, vec![]));

    // anonymous callers never reach the handler
    let response = reqwest::Client::new()
        .post(app.url("/api/reviews"))
        .json(&json!({"comment": "x", "starRate": 5, "productId": product.short_id}))
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::FORBIDDEN, response.status());
}

#[tokio::test]
async fn buyer_review_updates_aggregate() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let category_id = common::seed_category(&app.db_pool, "Home", "Lighting").await;
    let product = common::seed_product(&app.db_pool, category_id, "lamp", 0, 0).await;
    common::seed_order(&app.db_pool, "user-1", product.id).await;
    common::seed_order(&app.db_pool, "user-2", product.id).await;

    let response = post_review(&app, &app.token("user-1", common::USER), &product.short_id, 5).await;
    assert_eq!(StatusCode::CREATED, response.status());
    let body: Value = response.json().await.unwrap();
    let first_id = body["id"].as_i64().unwrap() as i32;
    assert_eq!(body["item"]["author_name"], "user user-1");

    let response = post_review(&app, &app.token("user-2", common::USER), &product.short_id, 4).await;
    assert_eq!(StatusCode::CREATED, response.status());
    let body: Value = response.json().await.unwrap();
    let second_id = body["id"].as_i64().unwrap() as i32;

    assert_eq!(
        product_summary(&app, &product.short_id).await,
        (9, 2, vec![first_id, second_id])
    );

    let body: Value = reqwest::get(app.url(&format!("/api/reviews/{}", product.short_id)))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["item"]["productStarRate"], "4.5");
    assert_eq!(body["item"]["sendReviews"][0]["starRate"], 5);
    assert_eq!(body["item"]["sendReviews"][1]["author"], "user user-2");

    let body: Value = reqwest::Client::new()
        .get(app.url("/api/reviewsByAuthor"))
        .bearer_auth(app.token("user-2", common::USER))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_rating_is_rejected() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let category_id = common::seed_category(&app.db_pool, "Home", "Lighting").await;
    let product = common::seed_product(&app.db_pool, category_id, "lamp", 0, 0).await;
    common::seed_order(&app.db_pool, "user-1", product.id).await;

    let response = post_review(&app, &app.token("user-1", common::USER), &product.short_id, 6).await;
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let response = post_review(&app, &app.token("user-1", common::USER), "missing", 3).await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn only_author_edits_and_deletes() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let category_id = common::seed_category(&app.db_pool, "Home", "Lighting").await;
    let product = common::seed_product(&app.db_pool, category_id, "lamp", 0, 0).await;
    common::seed_order(&app.db_pool, "user-1", product.id).await;

    let response = post_review(&app, &app.token("user-1", common::USER), &product.short_id, 2).await;
    let body: Value = response.json().await.unwrap();
    let review_id = body["id"].as_i64().unwrap();
    let client = reqwest::Client::new();
    let url = app.url(&format!("/api/reviews?reviewId={}", review_id));

    let response = client
        .patch(&url)
        .bearer_auth(app.token("user-2", common::USER))
        .json(&json!({"starRate": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::FORBIDDEN, response.status());

    let response = client
        .patch(&url)
        .bearer_auth(app.token("user-1", common::USER))
        .json(&json!({"starRate": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["star_rate"], 5);
    assert_eq!(body["item"]["comment"], "works well");
    assert_eq!(product_summary(&app, &product.short_id).await.0, 5);

    let response = client
        .delete(&url)
        .bearer_auth(app.token("user-1", common::USER))
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(product_summary(&app, &product.short_id).await, (0, 0, vec![]));

    let response = client
        .delete(&url)
        .bearer_auth(app.token("user-1", common::USER))
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn concurrent_reviews_keep_every_rating() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let category_id = common::seed_category(&app.db_pool, "Home", "Lighting").await;
    let product = common::seed_product(&app.db_pool, category_id, "lamp", 0, 0).await;
    let buyers: Vec<String> = (1..=5).map(|n| format!("buyer-{}", n)).collect();
    for buyer in &buyers {
        common::seed_order(&app.db_pool, buyer, product.id).await;
    }

    let tokens: Vec<String> = buyers
        .iter()
        .map(|buyer| app.token(buyer, common::USER))
        .collect();
    let responses = futures::future::join_all(
        tokens
            .iter()
            .zip(1..=5)
            .map(|(token, star_rate)| post_review(&app, token, &product.short_id, star_rate)),
    )
    .await;
    for response in responses {
        assert_eq!(StatusCode::CREATED, response.status());
    }

    let (star_rate_sum, review_count, review_ids) = product_summary(&app, &product.short_id).await;
    assert_eq!(star_rate_sum, 15);
    assert_eq!(review_count, 5);
    assert_eq!(review_ids.len(), 5);
}

#[tokio::test]
async fn updating_a_vanished_review_finds_nothing() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let review = storefront::models::Review {
        id: 4242,
        comment: "gone".to_string(),
        star_rate: 3,
        ..Default::default()
    };

    let updated = storefront::db::review::update(&app.db_pool, review)
        .await
        .expect("Update should not fail");
    assert!(updated.is_none());
}
