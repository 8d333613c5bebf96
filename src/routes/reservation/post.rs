use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    configuration::VenueSettings,
    db_interaction::{book_reservation, BookReservationError},
    domain::{BookingForm, FieldError, ValidBooking},
    models::{Reservation, ReservationBody, ReservationStatus},
    utils::{error_fmt_chain, get_pooled_connection, DbPool}
};

#[derive(Error)]
pub enum PostReservationError{
    #[error("invalid reservation payload")]
    ValidationFailed(Vec<FieldError>),
    #[error("Table not found")]
    TableNotFound,
    #[error("The table capacity is exceeded")]
    CapacityExceeded,
    #[error("Table not available")]
    SlotTaken,
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for PostReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostReservationError{
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            PostReservationError::ValidationFailed(_)
            | PostReservationError::CapacityExceeded => actix_web::http::StatusCode::BAD_REQUEST,
            PostReservationError::TableNotFound => actix_web::http::StatusCode::NOT_FOUND,
            PostReservationError::SlotTaken => actix_web::http::StatusCode::CONFLICT,
            PostReservationError::UnexpectedError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            PostReservationError::ValidationFailed(errors) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }))
            },
            other => {
                HttpResponse::build(other.status_code())
                    .json(serde_json::json!({ "error": format!("{}", other) }))
            }
        }
    }
}

#[tracing::instrument(
    "Creating a reservation",
    skip(pool, venue, body)
)]
pub async fn post_reservation(
    pool: web::Data<DbPool>,
    venue: web::Data<VenueSettings>,
    body: web::Json<BookingForm>
) -> Result<HttpResponse, PostReservationError>{
    let today = Utc::now().date_naive();

    let booking = ValidBooking::parse(body.into_inner(), today)
        .map_err(PostReservationError::ValidationFailed)?;

    let status = if venue.require_approval {
        ReservationStatus::Pending
    } else {
        ReservationStatus::Confirmed
    };

    let now = Utc::now();
    let record = Reservation{
        reservation_id: Uuid::new_v4(),
        table_id: booking.table_id,
        user_id: None,
        date: booking.date,
        time: booking.time.into_inner(),
        party_size: booking.party_size,
        customer_name: booking.customer_name.into_inner(),
        customer_email: booking.customer_email.into_inner(),
        customer_phone: booking.customer_phone.map(|phone| phone.into_inner()),
        status: status.as_str().to_string(),
        notes: booking.notes,
        created_at: now,
        updated_at: now
    };

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let (reservation, table) = book_reservation(conn, record)
        .await
        .map_err(|e| {
            match e {
                BookReservationError::TableNotFound(_) => PostReservationError::TableNotFound,
                BookReservationError::CapacityExceeded{ .. } => PostReservationError::CapacityExceeded,
                BookReservationError::SlotTaken => PostReservationError::SlotTaken,
                other => PostReservationError::UnexpectedError(anyhow::Error::new(other))
            }
        })?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Reservation successfully created!",
        "reservation": ReservationBody::from_record(reservation, Some(table))
    })))
}
