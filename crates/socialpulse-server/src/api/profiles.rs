use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use socialpulse_core::ProfileSnapshot;
use socialpulse_profiler::normalize_handle;

use crate::middleware::RequestId;

use super::{map_pipeline_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CreateProfileRequest {
    /// Older clients send `username`.
    #[serde(default, alias = "username")]
    pub handle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SnapshotsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileSnapshotItem {
    pub id: i64,
    #[serde(flatten)]
    pub snapshot: ProfileSnapshot,
}

pub(super) async fn create_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CreateProfileRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProfileSnapshot>>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            rejection.body_text(),
        )
    })?;

    let handle = body.handle.unwrap_or_default();
    let snapshot = state
        .pipeline
        .run(&handle)
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: snapshot,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_profile_snapshots(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
    Query(query): Query<SnapshotsQuery>,
) -> Result<Json<ApiResponse<Vec<ProfileSnapshotItem>>>, ApiError> {
    let Some(handle) = normalize_handle(&handle) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "handle is required",
        ));
    };

    let rows = state
        .pipeline
        .store()
        .list_snapshots(&handle, normalize_limit(query.limit))
        .await
        .map_err(|e| {
            tracing::error!(handle = %handle, error = %e, "snapshot listing failed");
            ApiError::new(req_id.0.clone(), "internal_error", "failed to list snapshots")
        })?;

    let data = rows
        .into_iter()
        .map(|row| ProfileSnapshotItem {
            id: row.id,
            snapshot: row.snapshot,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
