use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;

use crate::{db_interaction::get_active_tables, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetTablesQuery{
    pub min_capacity: Option<i32>
}

#[tracing::instrument(
    "Getting active tables",
    skip(pool)
)]
pub async fn get_tables(
    pool: web::Data<DbPool>,
    query: web::Query<GetTablesQuery>
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let tables = get_active_tables(conn, query.0.min_capacity)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(tables))
}
