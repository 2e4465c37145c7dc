//! Integration tests for concurrent requests against one registry.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use registro_server::router::build_router;
use registro_server::state::AppState;

async fn request_json(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(path);

    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_same_id_admit_exactly_one() {
    let app = build_router(AppState::in_memory());

    let tasks: Vec<_> = (0..24)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                request_json(
                    &app,
                    Method::POST,
                    "/estudiantes",
                    Some(json!({ "id": "555555555", "nombre": format!("Name {i}"), "carrera": "Math" })),
                )
                .await
            })
        })
        .collect();

    let mut created = 0;
    let mut rejected = 0;
    for task in tasks {
        let (status, body) = task.await.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => {
                assert_eq!(body["mensaje"], "Ya existe un estudiante con el ID: 555555555");
                rejected += 1;
            }
            other => panic!("unexpected status {other}: {body:?}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(rejected, 23);

    let (_, list) = request_json(&app, Method::GET, "/estudiantes", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_distinct_ids_all_succeed() {
    let app = build_router(AppState::in_memory());

    let tasks: Vec<_> = (0..40)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                request_json(
                    &app,
                    Method::POST,
                    "/estudiantes",
                    Some(json!({ "id": format!("{i:09}"), "nombre": "Ana", "carrera": "Math" })),
                )
                .await
            })
        })
        .collect();

    // Listing while writes are in flight only ever sees complete entries.
    let (status, snapshot) = request_json(&app, Method::GET, "/estudiantes", None).await;
    assert_eq!(status, StatusCode::OK);
    for student in snapshot.as_array().unwrap() {
        assert_eq!(student["nombre"], "Ana");
        assert_eq!(student["carrera"], "Math");
    }

    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::CREATED, "create failed: {body:?}");
    }

    let (_, list) = request_json(&app, Method::GET, "/estudiantes", None).await;
    assert_eq!(list.as_array().unwrap().len(), 40);
}
