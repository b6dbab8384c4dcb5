//! HTTP handlers for the expense resource

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::expense::{calc, DateWindow, ExpenseError, ExpenseRecord, NewExpense, Recurrence};
use crate::server::ServerState;

/// Expense create/replace request body
#[derive(Debug, Deserialize)]
pub struct ExpenseBody {
    pub amount: i64,
    pub start: DateTime<Utc>,
    /// Optional; defaults to `start` when omitted
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Integer recurrence code (1 = Monthly)
    #[serde(rename = "type")]
    pub kind: i64,
}

impl ExpenseBody {
    fn into_new_expense(self) -> Result<NewExpense, ExpenseError> {
        let recurrence = Recurrence::from_code(self.kind)?;
        let end = self.end.unwrap_or(self.start);
        Ok(NewExpense {
            recurrence,
            amount: self.amount,
            active_from: self.start,
            active_until: end,
        })
    }
}

/// One marshaled expense entry
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub uri: String,
    pub amount: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: i64,
}

impl EntryResponse {
    fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            uri: format!("/expense/{}", record.id),
            amount: record.amount,
            start: record.active_from,
            end: record.active_until,
            kind: record.recurrence.code(),
        }
    }
}

/// Listing response; `total` is present only for a bounded range query
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub entries: Vec<EntryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

/// Date-range query parameters for the listing endpoint
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

/// Status handler
pub async fn status_handler() -> impl IntoResponse {
    let response = StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// List handler: all expenses, or the overlapping subset when `start` is
/// given, plus a prorated total when the window is fully bounded
pub async fn list_expenses_handler(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    let Some(from) = query.start else {
        let entries = state.store.list();
        let response = ListResponse {
            entries: entries.iter().map(EntryResponse::from_record).collect(),
            total: None,
        };
        return (StatusCode::OK, Json(response)).into_response();
    };

    let entries = state.store.in_range(from, query.end);
    // The calculator only runs over a concrete window; an open-ended query
    // returns the matching entries without a total.
    let total = query
        .end
        .map(|to| calc::window_total(&entries, DateWindow::new(from, to)));

    let response = ListResponse {
        entries: entries.iter().map(EntryResponse::from_record).collect(),
        total,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Create handler
pub async fn create_expense_handler(
    State(state): State<ServerState>,
    Json(body): Json<ExpenseBody>,
) -> impl IntoResponse {
    let new = match body.into_new_expense() {
        Ok(new) => new,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid expense",
                    "details": e.to_string()
                }))
            ).into_response();
        }
    };

    let record = state.store.add(new);
    (StatusCode::CREATED, Json(EntryResponse::from_record(&record))).into_response()
}

/// Single-entry GET handler
pub async fn get_expense_handler(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.store.get(id) {
        Ok(record) => (StatusCode::OK, Json(EntryResponse::from_record(&record))).into_response(),
        Err(e) => not_found(e),
    }
}

/// Replace handler
pub async fn update_expense_handler(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(body): Json<ExpenseBody>,
) -> impl IntoResponse {
    let new = match body.into_new_expense() {
        Ok(new) => new,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid expense",
                    "details": e.to_string()
                }))
            ).into_response();
        }
    };

    match state.store.update(id, new) {
        Ok(record) => (StatusCode::OK, Json(EntryResponse::from_record(&record))).into_response(),
        Err(e) => not_found(e),
    }
}

/// Delete handler
pub async fn delete_expense_handler(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.store.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => not_found(e),
    }
}

fn not_found(e: ExpenseError) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Expense not found",
            "details": e.to_string()
        }))
    ).into_response()
}
