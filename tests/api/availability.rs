use tabletime::slots::TIME_SLOTS;

use crate::helpers::{booking_body, tomorrow, TestApp};

#[actix_web::test]
async fn availability_requires_a_date(){
    let app = TestApp::spawn_app().await;

    let response = app.get_availability("").await;
    assert_eq!(response.status().as_u16(), 400);

    let payload = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(payload["error"], "date is required");
}

#[actix_web::test]
async fn a_time_outside_the_grid_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.get_availability(&format!("?date={}&time=15:00", tomorrow())).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn booked_table_is_excluded_from_its_slot_only(){
    let app = TestApp::spawn_app().await;
    let date = tomorrow();

    for id in [1, 2, 3]{
        app.seed_table(id, 4, "Center");
    }

    let response = app.post_reservation(&booking_body(3, date, "19:00", 2)).await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.get_availability(&format!("?date={}", date)).await;
    assert_eq!(response.status().as_u16(), 200);

    let payload = response.json::<serde_json::Value>().await.unwrap();
    let availability = payload["availability"].as_object().unwrap();

    assert_eq!(availability.len(), TIME_SLOTS.len());

    for slot in TIME_SLOTS.iter(){
        let ids: Vec<i64> = availability[*slot].as_array().unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();

        if *slot == "19:00" {
            assert_eq!(ids, vec![1, 2]);
        } else {
            assert_eq!(ids, vec![1, 2, 3]);
        }
    }
}

#[actix_web::test]
async fn a_single_slot_query_lists_free_tables_only(){
    let app = TestApp::spawn_app().await;
    let date = tomorrow();

    app.seed_table(1, 4, "Window");
    app.seed_table(2, 4, "Center");

    let response = app.post_reservation(&booking_body(1, date, "20:30", 3)).await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.get_availability(&format!("?date={}&time=20:30", date)).await;
    assert_eq!(response.status().as_u16(), 200);

    let payload = response.json::<serde_json::Value>().await.unwrap();
    let ids: Vec<i64> = payload["availableTables"].as_array().unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![2]);
}

#[actix_web::test]
async fn party_size_filters_out_small_tables(){
    let app = TestApp::spawn_app().await;
    let date = tomorrow();

    app.seed_table(1, 2, "Window");
    app.seed_table(2, 4, "Center");
    app.seed_table(3, 8, "Family");

    let response = app.get_availability(&format!("?date={}&time=19:00&partySize=6", date)).await;
    assert_eq!(response.status().as_u16(), 200);

    let payload = response.json::<serde_json::Value>().await.unwrap();
    let tables = payload["availableTables"].as_array().unwrap();

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["id"], 3);
    assert!(tables.iter().all(|t| t["capacity"].as_i64().unwrap() >= 6));
}

#[actix_web::test]
async fn non_active_reservations_do_not_block_a_slot(){
    let app = TestApp::spawn_app().await;
    let date = tomorrow();

    app.seed_table(1, 4, "Window");
    app.seed_reservation(1, date, "19:00", "cancelled");
    app.seed_reservation(1, date, "19:30", "completed");

    let response = app.get_availability(&format!("?date={}", date)).await;
    let payload = response.json::<serde_json::Value>().await.unwrap();
    let availability = payload["availability"].as_object().unwrap();

    for slot in ["19:00", "19:30"]{
        let ids: Vec<i64> = availability[slot].as_array().unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();

        assert_eq!(ids, vec![1]);
    }
}

#[actix_web::test]
async fn no_tables_yields_empty_sets_not_an_error(){
    let app = TestApp::spawn_app().await;

    let response = app.get_availability(&format!("?date={}&time=19:00", tomorrow())).await;
    assert_eq!(response.status().as_u16(), 200);

    let payload = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(payload["availableTables"].as_array().unwrap().len(), 0);
}
