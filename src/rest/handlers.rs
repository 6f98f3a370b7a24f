use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::types::{IndexStatus, IndexerError, RepositoryId};

use super::{
    models::{
        ErrorResponse, HealthResponse, MeResponse, RepositoriesResponse, RepositoryResponse,
        StateResponse, StatusResponse,
    },
    AppState, CurrentUser,
};

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    let display_name = user.display_name().to_string();
    Json(MeResponse {
        name: user.name,
        email: user.email,
        display_name,
    })
}

pub async fn summary(State(state): State<AppState>, _user: CurrentUser) -> impl IntoResponse {
    let summary = state.controller.summary();
    Json(StateResponse {
        total: summary.total(),
        not_indexed: summary.not_indexed,
        indexing: summary.indexing,
        indexed: summary.indexed,
    })
}

pub async fn list_repositories(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> impl IntoResponse {
    Json(RepositoriesResponse {
        repositories: state.controller.list_repositories(),
    })
}

pub async fn get_repository(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_repository_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let controller = &state.controller;
    let lookup = controller.get_repository(id).and_then(|repository| {
        let last_error = controller.last_error(id)?;
        let changed = controller.last_changed(id)?;
        Ok((repository, last_error, changed))
    });

    match lookup {
        Ok((repository, last_error, changed)) => {
            let status_changed_secs_ago = changed.elapsed().map(|d| d.as_secs()).unwrap_or(0);
            Json(RepositoryResponse {
                status_label: repository.index_status.label().to_string(),
                repository,
                last_error,
                status_changed_secs_ago,
            })
            .into_response()
        }
        Err(err) => indexer_error_response(err),
    }
}

pub async fn get_status(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_repository_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.controller.get_status(id) {
        Ok(index_status) => Json(StatusResponse { id, index_status }).into_response(),
        Err(err) => indexer_error_response(err),
    }
}

pub async fn index_repository(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_repository_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.controller.request_index(id) {
        Ok(()) => {
            log::info!("👤 {} requested indexing of {}", user.display_name(), id);
            (
                StatusCode::ACCEPTED,
                Json(StatusResponse {
                    id,
                    index_status: IndexStatus::Indexing,
                }),
            )
                .into_response()
        }
        Err(err) => indexer_error_response(err),
    }
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("not found")))
}

fn parse_repository_id(raw: &str) -> Result<RepositoryId, Response> {
    raw.parse::<RepositoryId>().map_err(|err| {
        log::warn!("Invalid repository id {}: {}", raw, err);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("invalid repository id")),
        )
            .into_response()
    })
}

fn indexer_error_response(err: IndexerError) -> Response {
    let status = match &err {
        IndexerError::UnknownRepository(_) => StatusCode::NOT_FOUND,
        IndexerError::AlreadyIndexing(_) | IndexerError::AlreadyIndexed(_) => StatusCode::CONFLICT,
        IndexerError::IndexingFailed { .. } | IndexerError::DuplicateRepository(_) => {
            log::error!("Unexpected indexer error: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}
