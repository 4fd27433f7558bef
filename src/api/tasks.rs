//! Task endpoints.
//!
//! Each handler is one validate-then-store sequence:
//! - validation failures render every field error together as a 400, without
//!   touching the store
//! - store failures render a generic 500 with no internal detail
//!
//! Bodies arrive as raw `serde_json::Value` so validation can tell absent,
//! null, and wrongly-typed fields apart.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use crate::store::StoreError;
use crate::task::{self, FieldError, Task};

use super::routes::AppState;

/// Create the task routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/edit/:id", put(edit_task))
        .route("/tasks/:id", put(toggle_completion).delete(delete_task))
}

/// An error response from a task endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// One or more field-level problems; the store was never called.
    Validation(Vec<FieldError>),
    /// An opaque persistence failure.
    Store(StoreError),
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::Store(err) => {
                tracing::error!(?err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}

/// GET /tasks - List all tasks.
async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.list().await?;
    Ok(Json(tasks))
}

/// POST /tasks - Create a new task.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let fields = task::validate_create(&body)?;
    state
        .store
        .create(&fields.title, &fields.priority, fields.due_date)
        .await?;
    Ok((StatusCode::CREATED, "Task Added"))
}

/// PUT /tasks/edit/:id - Replace every mutable field of a task.
async fn edit_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<&'static str, ApiError> {
    let fields = task::validate_full_edit(&body)?;
    state
        .store
        .full_update(
            id,
            &fields.title,
            &fields.priority,
            fields.due_date,
            fields.completed,
        )
        .await?;
    Ok("Task Updated")
}

/// PUT /tasks/:id - Toggle completion.
///
/// The `completed` value is passed to the store raw, with no validation.
async fn toggle_completion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<&'static str, ApiError> {
    let completed = body.get("completed").cloned().unwrap_or(Value::Null);
    state.store.toggle_completion(id, &completed).await?;
    Ok("Task Updated")
}

/// DELETE /tasks/:id - Delete a task.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    state.store.delete(id).await?;
    Ok("Task Deleted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;
    use serde_json::json;

    fn test_state() -> Arc<AppState> {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE tasks (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                title     TEXT NOT NULL,
                priority  TEXT NOT NULL DEFAULT 'Low',
                due_date  TEXT,
                completed BOOLEAN NOT NULL DEFAULT 0
            )",
            [],
        )
        .unwrap();
        Arc::new(AppState {
            store: TaskStore::new(conn),
        })
    }

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let state = test_state();

        let (status, ack) = create_task(
            State(Arc::clone(&state)),
            Json(json!({"title": "Buy milk"})),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(ack, "Task Added");

        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].priority, "Low");
        assert!(!tasks[0].completed);
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_the_store() {
        let state = test_state();

        let err = create_task(State(Arc::clone(&state)), Json(json!({"title": "  "})))
            .await
            .unwrap_err();
        match err {
            ApiError::Validation(errors) => assert_eq!(errors[0].field, "title"),
            other => panic!("expected a validation error, got {:?}", other),
        }

        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn edit_rejects_non_boolean_completed_and_leaves_row_unchanged() {
        let state = test_state();
        create_task(
            State(Arc::clone(&state)),
            Json(json!({"title": "original"})),
        )
        .await
        .unwrap();
        let Json(tasks) = list_tasks(State(Arc::clone(&state))).await.unwrap();
        let id = tasks[0].id;

        let err = edit_task(
            State(Arc::clone(&state)),
            Path(id),
            Json(json!({"title": "changed", "priority": "High", "completed": "yes"})),
        )
        .await
        .unwrap_err();
        match err {
            ApiError::Validation(errors) => assert_eq!(errors[0].field, "completed"),
            other => panic!("expected a validation error, got {:?}", other),
        }

        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert_eq!(tasks[0].title, "original");
    }

    #[tokio::test]
    async fn edit_updates_all_fields() {
        let state = test_state();
        create_task(State(Arc::clone(&state)), Json(json!({"title": "before"})))
            .await
            .unwrap();
        let Json(tasks) = list_tasks(State(Arc::clone(&state))).await.unwrap();
        let id = tasks[0].id;

        let ack = edit_task(
            State(Arc::clone(&state)),
            Path(id),
            Json(json!({
                "title": "after",
                "priority": "High",
                "due_date": "2026-09-01",
                "completed": true
            })),
        )
        .await
        .unwrap();
        assert_eq!(ack, "Task Updated");

        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert_eq!(tasks[0].title, "after");
        assert_eq!(tasks[0].priority, "High");
        assert!(tasks[0].completed);
    }

    #[tokio::test]
    async fn toggle_flips_the_stored_boolean() {
        let state = test_state();
        create_task(State(Arc::clone(&state)), Json(json!({"title": "t"})))
            .await
            .unwrap();
        let Json(tasks) = list_tasks(State(Arc::clone(&state))).await.unwrap();
        let id = tasks[0].id;

        let ack = toggle_completion(
            State(Arc::clone(&state)),
            Path(id),
            Json(json!({"completed": true})),
        )
        .await
        .unwrap();
        assert_eq!(ack, "Task Updated");

        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert!(tasks[0].completed);
    }

    #[tokio::test]
    async fn toggle_accepts_a_non_boolean_without_validation() {
        let state = test_state();
        create_task(State(Arc::clone(&state)), Json(json!({"title": "t"})))
            .await
            .unwrap();
        let Json(tasks) = list_tasks(State(Arc::clone(&state))).await.unwrap();
        let id = tasks[0].id;

        toggle_completion(State(state), Path(id), Json(json!({"completed": "yes"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_is_uniform_for_missing_and_existing_ids() {
        let state = test_state();
        create_task(State(Arc::clone(&state)), Json(json!({"title": "t"})))
            .await
            .unwrap();
        let Json(tasks) = list_tasks(State(Arc::clone(&state))).await.unwrap();
        let id = tasks[0].id;

        let existing = delete_task(State(Arc::clone(&state)), Path(id))
            .await
            .unwrap();
        let missing = delete_task(State(Arc::clone(&state)), Path(9999))
            .await
            .unwrap();
        assert_eq!(existing, missing);

        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn validation_errors_render_as_400_json() {
        let response =
            ApiError::Validation(vec![FieldError { field: "title", message: "title is required" }])
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_failures_render_as_opaque_500() {
        // A store with no schema fails every operation.
        let state = Arc::new(AppState {
            store: TaskStore::new(rusqlite::Connection::open_in_memory().unwrap()),
        });

        let err = list_tasks(State(state)).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
