//! Axum route handlers for the partner directory RPC API.
//!
//! Mutating handlers validate first, mutate second, snapshot third. A
//! snapshot failure after a durable write is downgraded to a warning on
//! the success payload; it never unwinds the write.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use partner_directory_types::*;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::backup::BackupManager;
use crate::db::Db;
use crate::responder;
use crate::validator;

pub struct AppState {
    pub db: Arc<Db>,
    pub backups: BackupManager,
    pub start_time: Instant,
    pub last_backup_at: Arc<Mutex<Option<String>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AskParams {
    pub question: Option<String>,
}

/// Snapshot after a successful write; a failure becomes a warning.
async fn snapshot_after_write(state: &AppState) -> Option<String> {
    match state.backups.snapshot(&state.db) {
        Ok(receipt) => {
            *state.last_backup_at.lock().await = Some(receipt.timestamp);
            None
        }
        Err(e) => {
            log::warn!("Backup after write failed: {}", e);
            Some(format!("backup failed: {}", e))
        }
    }
}

// =====================================================
// Partner Endpoints
// =====================================================

// GET /rpc/partners/search
pub async fn partners_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<RpcResponse<Vec<PartnerRecord>>>) {
    let term = params.query.unwrap_or_default();
    match state.db.search(&term) {
        Ok(records) => (StatusCode::OK, Json(RpcResponse::ok(records))),
        Err(e) => {
            log::error!("Search failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RpcResponse::err(format!("Search failed: {}", e))),
            )
        }
    }
}

// POST /rpc/partners/add
pub async fn partners_add(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddPartnerRequest>,
) -> (StatusCode, Json<RpcResponse<AddPartnerResult>>) {
    let partner = match validator::validate_new_partner(&req) {
        Ok(p) => p,
        Err(e) => {
            let code = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            return (code, Json(RpcResponse::err(e.to_string())));
        }
    };

    let record = match state.db.insert(&partner) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Failed to add partner: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RpcResponse::err(format!("Failed to add partner: {}", e))),
            );
        }
    };

    let warning = snapshot_after_write(&state).await;
    (
        StatusCode::OK,
        Json(RpcResponse::ok(AddPartnerResult {
            id: record.id,
            warning,
        })),
    )
}

// DELETE /rpc/partners/:id
pub async fn partners_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<RpcResponse<DeletePartnerResult>>) {
    match state.db.delete(id) {
        Ok(()) => {
            let warning = snapshot_after_write(&state).await;
            (
                StatusCode::OK,
                Json(RpcResponse::ok(DeletePartnerResult { id, warning })),
            )
        }
        Err(e) => {
            log::error!("Failed to delete partner: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RpcResponse::err(format!("Failed to delete partner: {}", e))),
            )
        }
    }
}

// =====================================================
// Q&A Endpoint
// =====================================================

// GET /rpc/qa
pub async fn qa(
    Query(params): Query<AskParams>,
) -> (StatusCode, Json<RpcResponse<QaAnswer>>) {
    let question = params.question.unwrap_or_default();
    let answer = responder::answer(&question);
    (
        StatusCode::OK,
        Json(RpcResponse::ok(QaAnswer {
            answer: answer.to_string(),
        })),
    )
}

// =====================================================
// Service Endpoints
// =====================================================

// POST /rpc/backup
pub async fn backup_now(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<BackupReceipt>>) {
    match state.backups.snapshot(&state.db) {
        Ok(receipt) => {
            *state.last_backup_at.lock().await = Some(receipt.timestamp.clone());
            (StatusCode::OK, Json(RpcResponse::ok(receipt)))
        }
        Err(e) => {
            log::error!("Manual backup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RpcResponse::err(format!("Backup failed: {}", e))),
            )
        }
    }
}

// GET /rpc/stats
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<DirectoryStats>>) {
    match state.db.get_stats() {
        Ok(s) => (StatusCode::OK, Json(RpcResponse::ok(s))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcResponse::err(format!("Stats query failed: {}", e))),
        ),
    }
}

// GET /rpc/status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    let stats = state.db.get_stats().ok();
    let last_backup_at = state.last_backup_at.lock().await.clone();

    (
        StatusCode::OK,
        Json(RpcResponse::ok(ServiceStatus {
            running: true,
            uptime_secs: state.start_time.elapsed().as_secs(),
            total_partners: stats.map(|s| s.total_partners).unwrap_or(0),
            last_backup_at,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_state(dir: &TempDir) -> Arc<AppState> {
        let db_path = dir.path().join("partners.db");
        let db = Arc::new(Db::open(db_path.to_str().unwrap()).expect("open db"));
        let backups = BackupManager::new(dir.path().join("backups"));
        backups.init().expect("create backup dir");
        Arc::new(AppState {
            db,
            backups,
            start_time: Instant::now(),
            last_backup_at: Arc::new(Mutex::new(None)),
        })
    }

    fn full_request() -> AddPartnerRequest {
        AddPartnerRequest {
            name: Some("Acme Robotics".to_string()),
            partner_type: Some("Business".to_string()),
            resources: Some("Internships, 3D printers".to_string()),
            contact_info: Some("info@acme.com".to_string()),
        }
    }

    fn backup_files(state: &AppState) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(state.backups.backup_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn add_then_search_returns_the_record() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let (code, Json(added)) =
            partners_add(State(state.clone()), Json(full_request())).await;
        assert_eq!(code, StatusCode::OK);
        let added = added.data.unwrap();
        assert!(added.warning.is_none());

        let (code, Json(found)) = partners_search(
            State(state),
            Query(SearchParams {
                query: Some("robot".to_string()),
            }),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        let records = found.data.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, added.id);
        assert_eq!(records[0].name, "Acme Robotics");
    }

    #[tokio::test]
    async fn search_without_query_lists_everything() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        partners_add(State(state.clone()), Json(full_request())).await;

        let (code, Json(resp)) =
            partners_search(State(state), Query(SearchParams::default())).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(resp.data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_rejects_missing_fields_without_persisting() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let mut req = full_request();
        req.contact_info = None;
        let (code, Json(resp)) = partners_add(State(state.clone()), Json(req)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(resp.error.as_deref(), Some("Missing required fields"));
        assert_eq!(state.db.get_stats().unwrap().total_partners, 0);
        // validation failures never reach the backup manager
        assert!(backup_files(&state).is_empty());
    }

    #[tokio::test]
    async fn add_rejects_bad_contact_format() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let mut req = full_request();
        req.contact_info = Some("not-an-email-or-phone".to_string());
        let (code, Json(resp)) = partners_add(State(state.clone()), Json(req)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.error.as_deref(),
            Some("Invalid contact information format")
        );
        assert_eq!(state.db.get_stats().unwrap().total_partners, 0);
    }

    #[tokio::test]
    async fn add_leaves_a_snapshot_behind() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        assert!(backup_files(&state).is_empty());

        partners_add(State(state.clone()), Json(full_request())).await;
        assert_eq!(backup_files(&state).len(), 1);
        assert!(state.last_backup_at.lock().await.is_some());
    }

    #[tokio::test]
    async fn delete_reports_success_for_unknown_id() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        partners_add(State(state.clone()), Json(full_request())).await;

        let (code, Json(resp)) = partners_delete(State(state.clone()), Path(999)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(resp.data.unwrap().id, 999);

        let (code, _) = partners_delete(State(state.clone()), Path(999)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(state.db.get_stats().unwrap().total_partners, 1);
    }

    #[tokio::test]
    async fn delete_snapshots_like_add_does() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let (_, Json(added)) =
            partners_add(State(state.clone()), Json(full_request())).await;
        let id = added.data.unwrap().id;
        let before = backup_files(&state).len();

        partners_delete(State(state.clone()), Path(id)).await;
        // same-second snapshots share a name, so allow overwrite
        assert!(backup_files(&state).len() >= before);
        assert_eq!(state.db.get_stats().unwrap().total_partners, 0);
    }

    #[tokio::test]
    async fn qa_answers_and_falls_back() {
        let (code, Json(resp)) = qa(Query(AskParams {
            question: Some("What is the purpose of this?".to_string()),
        }))
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(
            resp.data.unwrap().answer,
            crate::responder::PURPOSE_ANSWER
        );

        let (_, Json(resp)) = qa(Query(AskParams {
            question: Some("banana".to_string()),
        }))
        .await;
        assert_eq!(resp.data.unwrap().answer, crate::responder::FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn manual_backup_returns_a_receipt() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let (code, Json(resp)) = backup_now(State(state.clone())).await;
        assert_eq!(code, StatusCode::OK);
        let receipt = resp.data.unwrap();
        assert!(std::path::Path::new(&receipt.path).exists());
        assert_eq!(
            state.last_backup_at.lock().await.as_deref(),
            Some(receipt.timestamp.as_str())
        );
    }

    #[tokio::test]
    async fn status_reports_record_count() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        partners_add(State(state.clone()), Json(full_request())).await;

        let (code, Json(resp)) = status(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        let s = resp.data.unwrap();
        assert!(s.running);
        assert_eq!(s.total_partners, 1);
        assert!(s.last_backup_at.is_some());
    }

    #[tokio::test]
    async fn success_payload_omits_warning_on_the_wire() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let (_, Json(resp)) = partners_add(State(state), Json(full_request())).await;
        let wire = serde_json::to_string(&resp).unwrap();
        assert!(wire.contains(r#""success":true"#));
        assert!(!wire.contains("warning"));
    }
}
