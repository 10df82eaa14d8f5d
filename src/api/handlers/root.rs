use axum::response::IntoResponse;

/// Plain banner for `/`; intentionally undocumented in the OpenAPI spec.
pub async fn root() -> impl IntoResponse {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
