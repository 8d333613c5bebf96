use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    db_interaction::{set_reservation_cancelled, CancelReservationError},
    models::ReservationBody,
    utils::{error_fmt_chain, get_pooled_connection, DbPool}
};

#[derive(Error)]
pub enum CancelError{
    #[error("Reservation not found")]
    NotFound,
    #[error("Reservation has already been cancelled")]
    AlreadyCancelled,
    #[error("A {0} reservation can't be cancelled")]
    NotCancellable(String),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for CancelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for CancelError{
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            CancelError::NotFound => actix_web::http::StatusCode::NOT_FOUND,
            CancelError::AlreadyCancelled
            | CancelError::NotCancellable(_) => actix_web::http::StatusCode::BAD_REQUEST,
            CancelError::UnexpectedError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": format!("{}", self) }))
    }
}

#[tracing::instrument(
    "Cancelling a reservation",
    skip(pool)
)]
pub async fn cancel_reservation(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, CancelError>{
    let reservation_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let reservation = set_reservation_cancelled(conn, reservation_id)
        .await
        .map_err(|e| {
            match e {
                CancelReservationError::NotFound(_) => CancelError::NotFound,
                CancelReservationError::AlreadyCancelled => CancelError::AlreadyCancelled,
                CancelReservationError::NotCancellable(status) => CancelError::NotCancellable(status),
                other => CancelError::UnexpectedError(anyhow::Error::new(other))
            }
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Reservation canceled",
        "reservation": ReservationBody::from_record(reservation, None)
    })))
}
