use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::{Days, NaiveDate, Utc};
use diesel::{Connection, ExpressionMethods, OptionalExtension, PgTextExpressionMethods, QueryDsl, RunQueryDsl};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{DiningTable, Reservation, ReservationStatus, ACTIVE_STATUSES},
    schema::{reservations, tables},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

// Error associated with the guarded reservation insert
#[derive(Error)]
pub enum BookReservationError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("table_id: {0} doesn't exist or is inactive")]
    TableNotFound(i32),
    #[error("party of {requested} exceeds the table capacity of {capacity}")]
    CapacityExceeded{ requested: i32, capacity: i32 },
    #[error("an active reservation already holds this table, date and time")]
    SlotTaken
}

impl Debug for BookReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Creating reservation under the active-slot constraint",
    skip_all
)]
pub async fn book_reservation(
    mut conn: DbConnection,
    new_reservation: Reservation
) -> Result<(Reservation, DiningTable), BookReservationError> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<(Reservation, DiningTable), BookReservationError, _>(|conn|{
            let table = tables::table
                .filter(tables::id.eq(new_reservation.table_id))
                .filter(tables::is_active.eq(true))
                .first::<DiningTable>(conn)
                .optional()?
                .ok_or(BookReservationError::TableNotFound(new_reservation.table_id))?;

            if new_reservation.party_size > table.capacity {
                return Err(BookReservationError::CapacityExceeded{
                    requested: new_reservation.party_size,
                    capacity: table.capacity
                })
            }

            // The partial unique index over active reservations is the
            // admission control: a concurrent insert against the same
            // (table_id, date, time) key surfaces here as a unique
            // violation, never as a second winner.
            diesel::insert_into(reservations::table)
                .values(&new_reservation)
                .execute(conn)
                .map_err(|e| {
                    match e {
                        diesel::result::Error::DatabaseError(
                            diesel::result::DatabaseErrorKind::UniqueViolation,
                            _
                        ) => BookReservationError::SlotTaken,

                        other => BookReservationError::RunQueryError(other)
                    }
                })?;

            Ok((new_reservation, table))
        })
    })
    .await??;

    Ok(res)
}

// Error associated with cancelling a reservation
#[derive(Error)]
pub enum CancelReservationError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("reservation_id: {0} doesn't exist")]
    NotFound(Uuid),
    #[error("reservation has already been cancelled")]
    AlreadyCancelled,
    #[error("a {0} reservation can't be cancelled")]
    NotCancellable(String),
    #[error("reservation carries an unknown status: {0}")]
    UnknownStatus(String)
}

impl Debug for CancelReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Cancelling a reservation",
    skip(conn)
)]
pub async fn set_reservation_cancelled(
    mut conn: DbConnection,
    reservation_id: Uuid
) -> Result<Reservation, CancelReservationError> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<Reservation, CancelReservationError, _>(|conn|{
            let reservation = reservations::table
                .find(reservation_id)
                .first::<Reservation>(conn)
                .optional()?
                .ok_or(CancelReservationError::NotFound(reservation_id))?;

            let current = ReservationStatus::parse(&reservation.status)
                .map_err(|_| CancelReservationError::UnknownStatus(reservation.status.clone()))?;

            if current == ReservationStatus::Cancelled {
                return Err(CancelReservationError::AlreadyCancelled)
            }

            if !current.can_transition_to(ReservationStatus::Cancelled){
                return Err(CancelReservationError::NotCancellable(current.as_str().to_string()))
            }

            let updated = diesel::update(reservations::table.find(reservation_id))
                .set((
                    reservations::status.eq(ReservationStatus::Cancelled.as_str()),
                    reservations::updated_at.eq(Utc::now())
                ))
                .get_result::<Reservation>(conn)?;

            Ok(updated)
        })
    })
    .await??;

    Ok(res)
}

// Synchronous variant, shared with the availability computation. Returns
// (time, table_id) pairs of reservations that hold a slot on the given
// date.
pub fn occupied_slots(
    conn: &mut DbConnection,
    date: NaiveDate,
    time: Option<&str>
) -> Result<Vec<(String, i32)>, diesel::result::Error>{
    let mut query = reservations::table
        .filter(reservations::date.eq(date))
        .filter(reservations::status.eq_any(ACTIVE_STATUSES))
        .select((reservations::time, reservations::table_id))
        .into_boxed();

    if let Some(time) = time{
        query = query.filter(reservations::time.eq(time.to_string()));
    }

    query.load::<(String, i32)>(conn)
}

#[derive(Debug, Default)]
pub struct ReservationFilter{
    pub date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub email: Option<String>
}

#[tracing::instrument(
    "Getting reservations from db",
    skip(conn)
)]
pub async fn find_reservations(
    mut conn: DbConnection,
    filter: ReservationFilter
) -> Result<Vec<Reservation>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        let mut query = reservations::table.into_boxed();

        if let Some(date) = filter.date{
            query = query.filter(reservations::date.eq(date));
        }

        if let Some(status) = filter.status{
            query = query.filter(reservations::status.eq(status.as_str()));
        }

        if let Some(email) = filter.email{
            query = query.filter(reservations::customer_email.ilike(format!("%{}%", email)));
        }

        query
            .order((reservations::date.asc(), reservations::time.asc()))
            .load::<Reservation>(&mut conn)
            .context("Failed to load reservations")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Getting reservation with its table snapshot",
    skip(conn)
)]
pub async fn get_reservation_with_table(
    mut conn: DbConnection,
    reservation_id: Uuid
) -> Result<Option<(Reservation, Option<DiningTable>)>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        let reservation = reservations::table
            .find(reservation_id)
            .first::<Reservation>(&mut conn)
            .optional()
            .context("Failed to load reservation")?;

        match reservation {
            None => Ok::<Option<(Reservation, Option<DiningTable>)>, anyhow::Error>(None),
            Some(reservation) => {
                // The table reference is weak: the snapshot is returned
                // even if the table has since been deactivated.
                let table = tables::table
                    .find(reservation.table_id)
                    .first::<DiningTable>(&mut conn)
                    .optional()
                    .context("Failed to load the reserved table")?;

                Ok(Some((reservation, table)))
            }
        }
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Retiring stale confirmed reservations",
    skip(conn)
)]
pub async fn sweep_expired(
    mut conn: DbConnection,
    as_of: NaiveDate
) -> Result<usize, anyhow::Error>{
    // Date-only comparison: a confirmed reservation is retired once its
    // date is strictly before as_of minus one day, regardless of slot
    // time-of-day.
    let cutoff = as_of - Days::new(1);

    let count = spawn_blocking_with_tracing(move || {
        diesel::update(
            reservations::table
                .filter(reservations::status.eq(ReservationStatus::Confirmed.as_str()))
                .filter(reservations::date.lt(cutoff))
        )
        .set((
            reservations::status.eq(ReservationStatus::Completed.as_str()),
            reservations::updated_at.eq(Utc::now())
        ))
        .execute(&mut conn)
        .context("Failed to retire stale reservations")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(count)
}
