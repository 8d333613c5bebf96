use chrono::{Days, Utc};
use diesel::{QueryDsl, RunQueryDsl};
use tabletime::{db_interaction::sweep_expired, schema::reservations};
use uuid::Uuid;

use crate::helpers::TestApp;

fn status_of(app: &TestApp, id: Uuid) -> String{
    let mut conn = app.pool.get().unwrap();
    reservations::table
        .find(id)
        .select(reservations::status)
        .first::<String>(&mut conn)
        .unwrap()
}

#[actix_web::test]
async fn stale_confirmed_reservations_are_retired(){
    let app = TestApp::spawn_app().await;
    let as_of = Utc::now().date_naive();

    app.seed_table(1, 4, "Window");

    let stale = app.seed_reservation(1, as_of - Days::new(2), "19:00", "confirmed");
    let yesterday = app.seed_reservation(1, as_of - Days::new(1), "19:00", "confirmed");
    let today = app.seed_reservation(1, as_of, "19:00", "confirmed");
    let cancelled = app.seed_reservation(1, as_of - Days::new(3), "19:00", "cancelled");
    let pending = app.seed_reservation(1, as_of - Days::new(3), "20:00", "pending");

    let conn = app.pool.get().unwrap();
    let count = sweep_expired(conn, as_of).await.unwrap();

    assert_eq!(count, 1);
    assert_eq!(status_of(&app, stale), "completed");

    // The cutoff is date-only and strict: yesterday's reservation survives.
    assert_eq!(status_of(&app, yesterday), "confirmed");
    assert_eq!(status_of(&app, today), "confirmed");

    // Non-confirmed rows are never transitioned by the sweep.
    assert_eq!(status_of(&app, cancelled), "cancelled");
    assert_eq!(status_of(&app, pending), "pending");
}

#[actix_web::test]
async fn rerunning_the_sweep_transitions_nothing_new(){
    let app = TestApp::spawn_app().await;
    let as_of = Utc::now().date_naive();

    app.seed_table(1, 4, "Window");
    app.seed_reservation(1, as_of - Days::new(5), "12:00", "confirmed");
    app.seed_reservation(1, as_of - Days::new(5), "12:30", "confirmed");

    let conn = app.pool.get().unwrap();
    let first = sweep_expired(conn, as_of).await.unwrap();
    assert_eq!(first, 2);

    let conn = app.pool.get().unwrap();
    let second = sweep_expired(conn, as_of).await.unwrap();
    assert_eq!(second, 0);

    let mut conn = app.pool.get().unwrap();
    let rows: i64 = reservations::table
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();
    assert_eq!(rows, 2);
}

#[actix_web::test]
async fn retired_reservations_stop_blocking_availability(){
    let app = TestApp::spawn_app().await;
    let as_of = Utc::now().date_naive();

    app.seed_table(1, 4, "Window");
    app.seed_reservation(1, as_of - Days::new(2), "19:00", "confirmed");

    let conn = app.pool.get().unwrap();
    sweep_expired(conn, as_of).await.unwrap();

    let past_date = as_of - Days::new(2);
    let response = app.get_availability(&format!("?date={}&time=19:00", past_date)).await;
    let payload = response.json::<serde_json::Value>().await.unwrap();

    let ids: Vec<i64> = payload["availableTables"].as_array().unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![1]);
}
