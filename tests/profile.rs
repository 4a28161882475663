mod common;

use serde_json::{Value, json};
use sqlx::PgPool;

use common::{TEST_PASSWORD, create_property, get_access_token, login, property_payload, spawn_app};

#[sqlx::test]
async fn preferences_can_be_updated_partially(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;

    let response = client
        .patch(format!("{address}/users/me/preferences"))
        .bearer_auth(&token)
        .json(&json!({ "notification_frequency": "WEEKLY" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["notification_frequency"], "WEEKLY");
    assert_eq!(body["preferred_weather_tips"], true);

    let response = client
        .patch(format!("{address}/users/me/preferences"))
        .bearer_auth(&token)
        .json(&json!({ "preferred_weather_tips": false }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["notification_frequency"], "WEEKLY");
    assert_eq!(body["preferred_weather_tips"], false);
}

#[sqlx::test]
async fn invalid_preferences_are_unprocessable(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;

    for payload in [json!({}), json!({ "notification_frequency": "HOURLY" })] {
        let response = client
            .patch(format!("{address}/users/me/preferences"))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            "{payload}"
        );
    }
}

#[sqlx::test]
async fn notifications_are_listed_for_owner(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;

    let listed: Vec<Value> = client
        .get(format!("{address}/users/me/notifications"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(listed.is_empty());
}

#[sqlx::test]
async fn deleting_account_removes_owned_records(pool: PgPool) {
    let (address, _) = spawn_app(pool.clone()).await;
    let client = reqwest::Client::new();

    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;
    let other = get_access_token(&client, &address, "other@example.com", "+19876543210").await;
    create_property(&client, &address, &token, &property_payload(Some("Vienna"))).await;
    create_property(&client, &address, &other, &property_payload(Some("Vienna"))).await;

    // One of each dependent row for the owner
    let response = client
        .get(format!("{address}/weather-tips?city=Vienna"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let response = client
        .post(format!("{address}/optimize_energy_usage_send_email"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    common::wait_for_notification_status(&pool, "owner@example.com").await;

    let response = client
        .delete(format!("{address}/users/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["deleted"]["real_estates"], 1);
    assert_eq!(body["deleted"]["recommendations"], 1);
    assert_eq!(body["deleted"]["notifications"], 1);
    assert_eq!(body["deleted"]["weather_based_recommendations"], 1);

    let remaining_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    let remaining_properties: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM real_estates")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining_users, 1);
    assert_eq!(remaining_properties, 1);

    // The old token now points at nobody
    let response = client
        .get(format!("{address}/users/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

    let retry = login(&client, &address, "owner@example.com", TEST_PASSWORD).await;
    assert!(retry.access_token.is_none());
}
