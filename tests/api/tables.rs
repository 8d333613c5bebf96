use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use tabletime::{models::DiningTable, schema::tables};

use crate::helpers::TestApp;

#[actix_web::test]
async fn add_table_creates_row(){
    let app = TestApp::spawn_app().await;

    let body = serde_json::json!({
        "id": 4,
        "capacity": 6,
        "type": "Terrace",
        "description": "by the railing"
    });

    let response = app.post_table(&body).await;
    assert_eq!(response.status().as_u16(), 201);

    let mut conn = app.pool.get().unwrap();
    let count: i64 = tables::table
        .filter(tables::id.eq(4))
        .filter(tables::capacity.eq(6))
        .filter(tables::is_active.eq(true))
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();

    assert_eq!(count, 1);
}

#[actix_web::test]
async fn duplicate_table_id_is_rejected(){
    let app = TestApp::spawn_app().await;

    let body = serde_json::json!({
        "id": 1,
        "capacity": 4,
        "type": "Window"
    });

    let first = app.post_table(&body).await;
    assert_eq!(first.status().as_u16(), 201);

    let second = app.post_table(&body).await;
    assert_eq!(second.status().as_u16(), 400);

    let payload = second.json::<serde_json::Value>().await.unwrap();
    assert_eq!(payload["error"], "Table with ID already created");
}

#[actix_web::test]
async fn invalid_table_payload_reports_every_field(){
    let app = TestApp::spawn_app().await;

    let body = serde_json::json!({
        "id": 0,
        "capacity": 25,
        "type": "Rooftop"
    });

    let response = app.post_table(&body).await;
    assert_eq!(response.status().as_u16(), 400);

    let payload = response.json::<serde_json::Value>().await.unwrap();
    let errors = payload["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors.iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();

    assert_eq!(fields, vec!["id", "capacity", "type"]);
}

#[actix_web::test]
async fn get_tables_lists_active_tables_sorted_by_id(){
    let app = TestApp::spawn_app().await;

    app.seed_table(3, 4, "Center");
    app.seed_table(1, 2, "Window");
    app.seed_table_with_active(2, 8, "Private", false);

    let response = app.api_client
        .get(format!("{}/tables", app.get_app_url()))
        .send()
        .await
        .expect("Failed to get response");

    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<Vec<DiningTable>>().await.unwrap();
    let ids: Vec<i32> = body.iter().map(|t| t.id).collect();

    assert_eq!(ids, vec![1, 3]);
}

#[actix_web::test]
async fn get_tables_honours_min_capacity(){
    let app = TestApp::spawn_app().await;

    app.seed_table(1, 2, "Window");
    app.seed_table(2, 6, "Family");
    app.seed_table(3, 10, "Private");

    let response = app.api_client
        .get(format!("{}/tables?minCapacity=6", app.get_app_url()))
        .send()
        .await
        .expect("Failed to get response");

    let body = response.json::<Vec<DiningTable>>().await.unwrap();
    let ids: Vec<i32> = body.iter().map(|t| t.id).collect();

    assert_eq!(ids, vec![2, 3]);
}
