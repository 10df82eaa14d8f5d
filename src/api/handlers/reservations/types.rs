//! Request/response types for reservation APIs.
//!
//! These payloads are shared between handlers and `OpenAPI` generation. Dates
//! use RFC 3339; field names are camelCase on the wire.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Id of the car being reserved.
    pub car: Uuid,
    pub status: Option<String>,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub car: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: String,
    pub car: String,
    pub user: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub created_at: String,
}

/// Canonical timestamp rendering for API payloads (UTC, second precision).
pub(super) fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_instant_is_utc_rfc3339() {
        let instant = Utc.with_ymd_and_hms(2023, 10, 5, 12, 30, 0).single();
        assert_eq!(instant.map(format_instant).as_deref(), Some("2023-10-05T12:30:00Z"));
    }

    #[test]
    fn update_request_defaults_to_empty_patch() {
        let patch = UpdateReservationRequest::default();
        assert!(patch.start_date.is_none());
        assert!(patch.end_date.is_none());
        assert!(patch.car.is_none());
    }

    #[test]
    fn create_request_accepts_camel_case_payload() {
        let payload = serde_json::json!({
            "startDate": "2023-10-01T10:00:00Z",
            "endDate": "2023-10-05T10:00:00Z",
            "car": "8e9eb07e-8b54-4a61-bd6c-3a1c915e48a9"
        });
        let request: Result<CreateReservationRequest, _> = serde_json::from_value(payload);
        assert!(request.is_ok());
        if let Ok(request) = request {
            assert!(request.status.is_none());
            assert!(request.start_date < request.end_date);
        }
    }
}
