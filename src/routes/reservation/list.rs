use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    db_interaction::{find_reservations, ReservationFilter},
    models::{ReservationBody, ReservationStatus},
    utils::{error_fmt_chain, get_pooled_connection, DbPool}
};

#[derive(Deserialize, Debug)]
pub struct ListReservationsQuery{
    pub date: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>
}

#[derive(Error)]
pub enum ListReservationsError{
    #[error("{0} is not a valid ISO date")]
    InvalidDate(String),
    #[error("{0} is not a valid reservation status")]
    InvalidStatus(String),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for ListReservationsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ListReservationsError{
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ListReservationsError::InvalidDate(_)
            | ListReservationsError::InvalidStatus(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ListReservationsError::UnexpectedError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": format!("{}", self) }))
    }
}

#[tracing::instrument(
    "Listing reservations",
    skip(pool)
)]
pub async fn list_reservations(
    pool: web::Data<DbPool>,
    query: web::Query<ListReservationsQuery>
) -> Result<HttpResponse, ListReservationsError>{
    let query = query.into_inner();

    let date = match query.date {
        Some(date) => Some(
            NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| ListReservationsError::InvalidDate(date))?
        ),
        None => None
    };

    let status = match query.status {
        Some(status) => Some(
            ReservationStatus::parse(&status)
                .map_err(|_| ListReservationsError::InvalidStatus(status))?
        ),
        None => None
    };

    let filter = ReservationFilter{
        date,
        status,
        email: query.email
    };

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let reservations = find_reservations(conn, filter)
        .await
        .map_err(ListReservationsError::UnexpectedError)?;

    let body: Vec<ReservationBody> = reservations
        .into_iter()
        .map(|reservation| ReservationBody::from_record(reservation, None))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}
