mod common;

use serde_json::{Value, json};
use sqlx::PgPool;

use common::{create_property, get_access_token, property_payload, spawn_app};

#[sqlx::test]
async fn create_property_stores_owned_row(pool: PgPool) {
    let (address, _) = spawn_app(pool.clone()).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;

    let property_id = create_property(&client, &address, &token, &property_payload(Some("Vienna"))).await;

    let (owner_email, location): (String, Option<String>) = sqlx::query_as(
        r#"
        SELECT u.email, r.location
        FROM real_estates r JOIN users u ON u.id = r.user_id
        WHERE r.id = $1
        "#,
    )
    .bind(property_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(owner_email, "owner@example.com");
    assert_eq!(location.as_deref(), Some("Vienna"));

    let listed: Vec<Value> = client
        .get(format!("{address}/real-estates"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], property_id.to_string());
}

#[sqlx::test]
async fn invalid_property_is_rejected(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;

    let test_cases = vec![
        ("square_area", json!(0), "Zero area"),
        ("year_built", json!(1800), "Too old"),
        ("year_built", json!(2500), "In the future"),
        ("insulation_quality", json!(""), "Blank insulation"),
    ];

    for (field, value, description) in test_cases {
        let mut payload = property_payload(Some("Vienna"));
        payload[field] = value;

        let response = client
            .post(format!("{address}/real-estates"))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            "{description}"
        );
    }
}

#[sqlx::test]
async fn property_tips_follow_local_weather(pool: PgPool) {
    let (address, _) = spawn_app(pool.clone()).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;
    let property_id = create_property(&client, &address, &token, &property_payload(Some("Dubai"))).await;

    let response = client
        .get(format!("{address}/real-estates/{property_id}/tips?date=2024-07-01"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["city"], "Dubai");
    assert_eq!(body["date"], "2024-07-01");
    assert_eq!(body["temperature"], 38.0);

    let tips = body["tips"].as_array().unwrap();
    assert_eq!(tips.len(), 11);
    assert!(tips.iter().any(|t| t.as_str().unwrap().contains("AC")));

    let (stored_tips, condition): (String, String) = sqlx::query_as(
        "SELECT weather_tips, temperature_condition FROM weather_based_recommendations",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(stored_tips.lines().count(), 11);
    assert!(condition.contains("hot"));
}

#[sqlx::test]
async fn property_of_another_user_is_not_found(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let owner = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;
    let intruder = get_access_token(&client, &address, "intruder@example.com", "+19876543210").await;
    let property_id = create_property(&client, &address, &owner, &property_payload(Some("Vienna"))).await;

    let response = client
        .get(format!("{address}/real-estates/{property_id}/tips"))
        .bearer_auth(&intruder)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Real estate not found or access denied.");
}

#[sqlx::test]
async fn tips_without_weather_data_are_not_found(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;

    let unknown_city = create_property(&client, &address, &token, &property_payload(Some("Atlantis"))).await;
    let no_location = create_property(&client, &address, &token, &property_payload(None)).await;

    for property_id in [unknown_city, no_location] {
        let response = client
            .get(format!("{address}/real-estates/{property_id}/tips"))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
}

#[sqlx::test]
async fn malformed_date_is_unprocessable(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;
    let property_id = create_property(&client, &address, &token, &property_payload(Some("Vienna"))).await;

    let response = client
        .get(format!("{address}/real-estates/{property_id}/tips?date=01-07-2024"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test]
async fn malformed_tip_parameters_are_unprocessable(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;

    let test_cases = vec![
        ("/real-estates/not-a-uuid/tips", "Invalid path parameter.", "Property id is not a UUID"),
        ("/weather-tips", "Invalid query parameters.", "City is missing"),
        ("/weather-tips?city=%20%20", "City must not be blank.", "City is blank"),
    ];

    for (path, detail, description) in test_cases {
        let response = client
            .get(format!("{address}{path}"))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            "{description}"
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["detail"], detail, "{description}");
    }
}

#[sqlx::test]
async fn city_tips_for_cold_weather(pool: PgPool) {
    let (address, _) = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = get_access_token(&client, &address, "owner@example.com", "+12345678901").await;

    let response = client
        .get(format!("{address}/weather-tips"))
        .query(&[("city", "Oslo")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["city"], "Oslo");
    let tips: Vec<&str> = body["tips"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    assert!(tips.iter().any(|t| t.contains("insulation")));
    assert!(tips.iter().any(|t| t.contains("heating")));

    let missing = client
        .get(format!("{address}/weather-tips"))
        .query(&[("city", "Atlantis")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}
