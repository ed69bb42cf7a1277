use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Board, BoardError, Employee, Roster, RosterSnapshot};

/// Roster and the board derived from it, swapped together. Replacing the
/// roster always replaces the board in the same write, so readers never see a
/// board built from a different dataset.
struct BoardState {
    roster: Roster,
    board: Board,
}

#[derive(Clone)]
pub struct AppState {
    state: Arc<RwLock<BoardState>>,
}

impl AppState {
    pub fn new(roster: Roster) -> Result<Self, polars::prelude::PolarsError> {
        let board = Board::build(&roster)?;
        Ok(Self {
            state: Arc::new(RwLock::new(BoardState { roster, board })),
        })
    }

    fn state(&self) -> Arc<RwLock<BoardState>> {
        self.state.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<polars::prelude::PolarsError> for ApiError {
    fn from(value: polars::prelude::PolarsError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl From<BoardError> for ApiError {
    fn from(value: BoardError) -> Self {
        match value {
            BoardError::UnknownDate(_) | BoardError::UnknownEmployee(_) => {
                ApiError::NotFound(value.to_string())
            }
            BoardError::DisabledEntry { .. } => ApiError::Invalid(value.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TogglePayload {
    employee: String,
    date: NaiveDate,
    checked: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/employees", get(list_employees))
        .route("/employees/:name", get(get_employee))
        .route("/board", get(get_board).post(replace_roster))
        .route("/board/recompute", post(recompute_board))
        .route("/board/toggle", post(toggle_entry))
        .route("/board/:date", get(get_day))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, roster: Roster) -> std::io::Result<()> {
    let state = AppState::new(roster).map_err(|err| std::io::Error::other(err.to_string()))?;
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let state = state.state();
    let employees = {
        let guard = state.read();
        guard.board.employees().to_vec()
    };
    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    let state = state.state();
    let result = {
        let guard = state.read();
        guard
            .roster
            .find_employee(&name)
            .map_err(|err| ApiError::internal(err.to_string()))?
    };
    match result {
        Some(employee) => Ok(Json(employee)),
        None => Err(ApiError::not_found(format!("employee '{name}' not found"))),
    }
}

async fn get_board(State(state): State<AppState>) -> Json<Board> {
    let state = state.state();
    let board = {
        let guard = state.read();
        guard.board.clone()
    };
    Json(board)
}

async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<crate::DayCard>, ApiError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::invalid(format!("invalid date '{date}' (expected YYYY-MM-DD)")))?;
    let state = state.state();
    let card = {
        let guard = state.read();
        guard.board.day(date).cloned()
    };
    match card {
        Some(card) => Ok(Json(card)),
        None => Err(ApiError::not_found(format!("no day card for {date}"))),
    }
}

async fn toggle_entry(
    State(state): State<AppState>,
    Json(payload): Json<TogglePayload>,
) -> Result<Json<crate::DayCard>, ApiError> {
    let state = state.state();
    let card = {
        let mut guard = state.write();
        guard
            .board
            .toggle(&payload.employee, payload.date, payload.checked)
            .map_err(ApiError::from)?
            .clone()
    };
    Ok(Json(card))
}

/// Replace the dataset and rebuild the board from scratch. Last write wins;
/// any previously rendered board is discarded along with its checkbox state.
async fn replace_roster(
    State(state): State<AppState>,
    Json(snapshot): Json<RosterSnapshot>,
) -> Result<Json<Board>, ApiError> {
    let roster = snapshot
        .into_roster()
        .map_err(|err| ApiError::invalid(err.to_string()))?;
    let board = Board::build(&roster).map_err(ApiError::from)?;
    let state = state.state();
    {
        let mut guard = state.write();
        guard.roster = roster;
        guard.board = board.clone();
    }
    Ok(Json(board))
}

async fn recompute_board(State(state): State<AppState>) -> Json<Board> {
    let state = state.state();
    let board = {
        let mut guard = state.write();
        guard.board.recompute_all();
        guard.board.clone()
    };
    Json(board)
}
