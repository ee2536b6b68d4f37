use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use sqlx::{types::Json as SqlJson, FromRow};
use std::sync::Arc;
use uuid::Uuid;

use atelier_shared::edit::is_well_formed_id;
use atelier_shared::{Customer, CustomerCreate, ImageAsset};

use crate::error::ValidationBuilder;
use crate::{ApiResult, AppError, AppState};

const CUSTOMER_COLUMNS: &str = "id, customer_name, phone_number, images, deadline";

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: String,
    customer_name: String,
    phone_number: String,
    images: SqlJson<Vec<ImageAsset>>,
    deadline: Option<NaiveDate>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            customer_name: row.customer_name,
            phone_number: row.phone_number,
            images: row.images.0,
            deadline: row.deadline,
        }
    }
}

pub fn customer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/:id", get(get_customer).put(update_customer))
}

fn check_id(id: &str) -> ApiResult<()> {
    if is_well_formed_id(id) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid customer identifier: {:?}", id)))
    }
}

async fn list_customers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Customer>>> {
    let rows = sqlx::query_as::<_, CustomerRow>(&format!(
        "SELECT {} FROM customers ORDER BY customer_name, id",
        CUSTOMER_COLUMNS
    ))
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(rows.into_iter().map(Customer::from).collect()))
}

async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Customer>> {
    check_id(&id)?;

    let row = sqlx::query_as::<_, CustomerRow>(&format!(
        "SELECT {} FROM customers WHERE id = $1",
        CUSTOMER_COLUMNS
    ))
    .bind(&id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

    Ok(Json(row.into()))
}

async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CustomerCreate>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    ValidationBuilder::new()
        .error_if(
            payload.customer_name.trim().is_empty(),
            "customer_name",
            "Customer name is required",
        )
        .error_if(
            payload.id.as_deref().is_some_and(|id| !is_well_formed_id(id)),
            "id",
            "Identifier may not contain whitespace, '/', '?', '#' or '%'",
        )
        .finish()?;

    let id = payload.id.unwrap_or_else(|| Uuid::new_v4().to_string());

    let row = sqlx::query_as::<_, CustomerRow>(&format!(
        "INSERT INTO customers (id, customer_name, phone_number, images, deadline)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        CUSTOMER_COLUMNS
    ))
    .bind(&id)
    .bind(&payload.customer_name)
    .bind(&payload.phone_number)
    .bind(SqlJson(&payload.images))
    .bind(payload.deadline)
    .fetch_one(&state.db_pool)
    .await?;

    tracing::info!(customer_id = %id, "Customer created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Replaces every stored field with the submitted record. Repeating the same
/// request leaves the row unchanged apart from `updated_at`.
async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(record): Json<Customer>,
) -> ApiResult<Json<Customer>> {
    check_id(&id)?;
    if record.id != id {
        return Err(AppError::BadRequest(
            "Record identifier does not match the request path".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, CustomerRow>(&format!(
        "UPDATE customers SET
         customer_name = $2,
         phone_number = $3,
         images = $4,
         deadline = $5,
         updated_at = NOW()
         WHERE id = $1
         RETURNING {}",
        CUSTOMER_COLUMNS
    ))
    .bind(&id)
    .bind(&record.customer_name)
    .bind(&record.phone_number)
    .bind(SqlJson(&record.images))
    .bind(record.deadline)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

    tracing::info!(customer_id = %id, images = record.images.len(), "Customer updated");
    Ok(Json(row.into()))
}
