use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use uuid::Uuid;

use crate::{
    db_interaction::get_reservation_with_table,
    models::ReservationBody,
    utils::{get_pooled_connection, DbPool}
};

#[tracing::instrument(
    "Getting a reservation by id",
    skip(pool)
)]
pub async fn get_reservation(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, actix_web::Error> {
    let reservation_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let found = get_reservation_with_table(conn, reservation_id)
        .await
        .map_err(ErrorInternalServerError)?;

    match found {
        None => Ok(HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "Reservation not found" }))),

        Some((reservation, table)) => {
            Ok(HttpResponse::Ok().json(ReservationBody::from_record(reservation, table)))
        }
    }
}
