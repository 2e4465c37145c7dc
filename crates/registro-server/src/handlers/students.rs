//! Student handlers (create, list).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use registro_core::Student;

use crate::error::ApiError;
use crate::schema::students::CreateStudentRequest;
use crate::state::AppState;

/// Registers a new student.
///
/// `POST /estudiantes`
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let Json(req) = payload?;
    let student = req.into_student()?;
    let saved = state.store.save(student)?;
    tracing::info!("registered student {}", saved.id());
    Ok((StatusCode::CREATED, Json(saved)))
}

/// Lists every registered student.
///
/// `GET /estudiantes`
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.store.list_all()?;
    Ok(Json(students))
}
