use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    db_interaction::{insert_table, TableInsertError},
    domain::FieldError,
    models::{DiningTable, TableType},
    utils::{error_fmt_chain, get_pooled_connection, DbPool}
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TableForm{
    pub id: i32,
    pub capacity: i32,
    #[serde(rename = "type")]
    pub table_type: String,
    pub is_active: Option<bool>,
    pub description: Option<String>
}

#[derive(Error)]
pub enum PostTableError{
    #[error("invalid table payload")]
    ValidationFailed(Vec<FieldError>),
    #[error("Table with ID already created")]
    DuplicateTableId,
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for PostTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostTableError{
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            PostTableError::ValidationFailed(_)
            | PostTableError::DuplicateTableId => actix_web::http::StatusCode::BAD_REQUEST,
            PostTableError::UnexpectedError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            PostTableError::ValidationFailed(errors) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }))
            },
            other => {
                HttpResponse::build(other.status_code())
                    .json(serde_json::json!({ "error": format!("{}", other) }))
            }
        }
    }
}

fn validate_table_form(form: &TableForm) -> Result<(), Vec<FieldError>>{
    let mut errors = Vec::new();

    if form.id <= 0 {
        errors.push(FieldError{ field: "id", message: "id must be a positive number".to_string() });
    }

    if !(1..=20).contains(&form.capacity){
        errors.push(FieldError{
            field: "capacity",
            message: "Capacity must be between 1 and 20".to_string()
        });
    }

    if let Err(message) = TableType::parse(&form.table_type){
        errors.push(FieldError{ field: "type", message });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[tracing::instrument(
    "Creating a table",
    skip(pool)
)]
pub async fn post_table(
    pool: web::Data<DbPool>,
    form: web::Json<TableForm>
) -> Result<HttpResponse, PostTableError>{
    let form = form.into_inner();

    validate_table_form(&form).map_err(PostTableError::ValidationFailed)?;

    let table = DiningTable{
        id: form.id,
        capacity: form.capacity,
        table_type: form.table_type,
        is_active: form.is_active.unwrap_or(true),
        description: form.description
    };

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let table = insert_table(conn, table)
        .await
        .map_err(|e| {
            match e {
                TableInsertError::DuplicateTableId(_) => PostTableError::DuplicateTableId,
                other => PostTableError::UnexpectedError(anyhow::Error::new(other))
            }
        })?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Table created",
        "table": table
    })))
}
