use std::num::IntErrorKind;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult, FieldViolation},
    models::{CreateProduct, Product},
    AppState,
};

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProduct>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let Json(payload) = payload?;
    let new = payload.validate().map_err(AppError::Validation)?;

    let mut store = state.store.write().await;
    let product = store
        .create(new)
        .map_err(|e| AppError::BadRequest(format!("Failed to create product: {e}")))?;
    let total = store.len();
    drop(store);

    info!(id = product.id, name = %product.name, price = product.price, total, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    raw: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Product>> {
    let Path(raw) = raw?;

    let id = match raw.parse::<i64>() {
        Ok(id) => id,
        // integers past the i64 range can never have been assigned
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(AppError::NotFound(format!("Product with ID {raw} not found")));
        }
        Err(_) => {
            return Err(AppError::Validation(vec![FieldViolation::new(
                "path",
                "id",
                "Input should be a valid integer, unable to parse string as an integer",
                "int_parsing",
            )]));
        }
    };

    let product = state
        .store
        .read()
        .await
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {id} not found")))?;

    info!(id, "Fetched product");

    Ok(Json(product))
}
