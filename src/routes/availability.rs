use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    availability::{compute_availability, Availability},
    slots::TimeSlot,
    utils::{error_fmt_chain, get_pooled_connection, DbPool}
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery{
    pub date: Option<String>,
    pub time: Option<String>,
    pub party_size: Option<i32>
}

#[derive(Error)]
pub enum AvailabilityError{
    #[error("date is required")]
    MissingDate,
    #[error("{0} is not a valid ISO date")]
    InvalidDate(String),
    #[error("{0} is not a bookable time slot")]
    InvalidSlot(String),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for AvailabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for AvailabilityError{
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AvailabilityError::MissingDate
            | AvailabilityError::InvalidDate(_)
            | AvailabilityError::InvalidSlot(_) => actix_web::http::StatusCode::BAD_REQUEST,
            AvailabilityError::UnexpectedError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": format!("{}", self) }))
    }
}

#[tracing::instrument(
    "Checking table availability",
    skip(pool)
)]
pub async fn get_availability(
    pool: web::Data<DbPool>,
    query: web::Query<AvailabilityQuery>
) -> Result<HttpResponse, AvailabilityError>{
    let query = query.into_inner();

    let date_raw = query.date.ok_or(AvailabilityError::MissingDate)?;
    let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
        .map_err(|_| AvailabilityError::InvalidDate(date_raw))?;

    let time = match query.time {
        Some(time) => Some(
            TimeSlot::parse(&time).map_err(|_| AvailabilityError::InvalidSlot(time))?
        ),
        None => None
    };

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let availability = compute_availability(conn, date, time, query.party_size).await?;

    let body = match availability {
        Availability::ForSlot(tables) => serde_json::json!({ "availableTables": tables }),
        Availability::BySlot(by_slot) => serde_json::json!({ "availability": by_slot })
    };

    Ok(HttpResponse::Ok().json(body))
}
