//! Car browsing endpoints.
//!
//! The fleet itself is read-only through this API; cars are provisioned out
//! of band. Browsing requires a session like every other `/v1` surface.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::json;
use sqlx::{PgPool, Row};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::auth::principal::require_auth;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: String,
    pub make: String,
    pub model: String,
    pub created_at: String,
}

#[utoipa::path(
    get,
    path = "/v1/cars",
    responses(
        (status = 200, description = "All cars in the fleet.", body = [CarResponse]),
        (status = 401, description = "Missing or invalid session."),
    ),
    tag = "cars"
)]
/// Lists every car in the fleet.
pub async fn list_cars(headers: HeaderMap, pool: Extension<PgPool>) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &pool).await {
        return status.into_response();
    }

    let query = r#"
        SELECT
            id::text AS id,
            make,
            model,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
        FROM cars
        ORDER BY make, model
    "#;
    match sqlx::query(query).fetch_all(&pool.0).await {
        Ok(rows) => {
            let cars: Vec<CarResponse> = rows
                .into_iter()
                .map(|row| CarResponse {
                    id: row.get("id"),
                    make: row.get("make"),
                    model: row.get("model"),
                    created_at: row.get("created_at"),
                })
                .collect();
            (StatusCode::OK, Json(cars)).into_response()
        }
        Err(err) => {
            error!("Failed to list cars: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/cars/{id}",
    params(("id" = Uuid, Path, description = "Car id")),
    responses(
        (status = 200, description = "The car.", body = CarResponse),
        (status = 401, description = "Missing or invalid session."),
        (status = 404, description = "Car not found."),
    ),
    tag = "cars"
)]
/// Fetches one car by id.
pub async fn get_car(
    Path(car_id): Path<Uuid>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &pool).await {
        return status.into_response();
    }

    let query = r#"
        SELECT
            id::text AS id,
            make,
            model,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
        FROM cars
        WHERE id = $1
        LIMIT 1
    "#;
    match sqlx::query(query).bind(car_id).fetch_optional(&pool.0).await {
        Ok(Some(row)) => {
            let car = CarResponse {
                id: row.get("id"),
                make: row.get("make"),
                model: row.get("model"),
                created_at: row.get("created_at"),
            };
            (StatusCode::OK, Json(car)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Car not found." })),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to fetch car: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
