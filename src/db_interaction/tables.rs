use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use thiserror::Error;

use crate::{
    models::DiningTable,
    schema::tables,
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

// Synchronous variant, shared with the availability computation which runs
// it inside its own blocking closure.
pub fn active_tables(
    conn: &mut DbConnection,
    min_capacity: Option<i32>
) -> Result<Vec<DiningTable>, diesel::result::Error>{
    let mut query = tables::table
        .filter(tables::is_active.eq(true))
        .into_boxed();

    if let Some(min_capacity) = min_capacity{
        query = query.filter(tables::capacity.ge(min_capacity));
    }

    query
        .order(tables::id.asc())
        .load::<DiningTable>(conn)
}

#[tracing::instrument(
    "Getting active tables from db",
    skip(conn)
)]
pub async fn get_active_tables(
    mut conn: DbConnection,
    min_capacity: Option<i32>
) -> Result<Vec<DiningTable>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        active_tables(&mut conn, min_capacity)
            .context("Failed to load active tables")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Error associated with creating a table
#[derive(Error)]
pub enum TableInsertError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("a table with id {0} already exists")]
    DuplicateTableId(i32)
}

impl Debug for TableInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting a table into db",
    skip(conn, table)
)]
pub async fn insert_table(
    mut conn: DbConnection,
    table: DiningTable
) -> Result<DiningTable, TableInsertError> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(tables::table)
            .values(&table)
            .execute(&mut conn)
            .map_err(|e| {
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _
                    ) => TableInsertError::DuplicateTableId(table.id),

                    other => TableInsertError::RunQueryError(other)
                }
            })?;

        Ok::<DiningTable, TableInsertError>(table)
    })
    .await??;

    Ok(res)
}
