//! End-to-end flows against an in-process mock paper server.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use qgen_cli::{cli_host, commands, CliError};
use qgen_core::{ClientConfig, SubmitError};
use serde_json::{json, Value};
use tempfile::TempDir;

/// One multipart part as seen by the server.
#[derive(Debug, Clone)]
struct Part {
    name: String,
    file_name: Option<String>,
    text: String,
}

#[derive(Default)]
struct Captured {
    uploads: Vec<Vec<Part>>,
    generations: Vec<(String, Vec<Part>)>,
}

type Shared = Arc<Mutex<Captured>>;

async fn read_parts(mut multipart: Multipart) -> Vec<Part> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        parts.push(Part {
            name,
            file_name,
            text: String::from_utf8_lossy(&bytes).to_string(),
        });
    }
    parts
}

async fn upload(State(state): State<Shared>, multipart: Multipart) -> Json<Value> {
    let parts = read_parts(multipart).await;
    state.lock().unwrap().uploads.push(parts);
    Json(json!({
        "status": "success",
        "message": "Files uploaded successfully",
        "redirect": "/configure/sess-42"
    }))
}

async fn generate(
    State(state): State<Shared>,
    Path(session_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let parts = read_parts(multipart).await;
    state.lock().unwrap().generations.push((session_id.clone(), parts));

    if session_id == "expired" {
        return Err((StatusCode::NOT_FOUND, Json(json!({ "detail": "Session not found" }))));
    }
    Ok(Json(json!({
        "status": "success",
        "redirect": "/preview/7",
        "paper_id": 7
    })))
}

async fn spawn_server() -> (String, Shared) {
    let state: Shared = Arc::default();
    let app = Router::new()
        .route("/upload", post(upload))
        .route("/generate/{session_id}", post(generate))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn fixtures() -> (TempDir, Vec<PathBuf>, PathBuf) {
    let dir = tempfile::tempdir().unwrap();

    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "Kinematics: velocity, acceleration").unwrap();
    let syllabus = dir.path().join("syllabus.txt");
    std::fs::write(&syllabus, "Unit 1. Motion").unwrap();

    let draft = dir.path().join("paper.json");
    std::fs::write(
        &draft,
        serde_json::to_string(&json!({
            "title": "Unit test",
            "subject": "Physics",
            "total_marks": 20,
            "difficulty": 4,
            "priority_topics": ["Kinematics", "Optics"],
            "question_sets": [
                {"type": "mcq", "marks": 1, "count": 10},
                {"type": "short", "marks": 5, "count": 2}
            ]
        }))
        .unwrap(),
    )
    .unwrap();

    (dir, vec![notes, syllabus], draft)
}

fn text<'a>(parts: &'a [Part], name: &str) -> Option<&'a str> {
    parts.iter().find(|p| p.name == name).map(|p| p.text.as_str())
}

#[tokio::test]
async fn test_run_uploads_then_generates() {
    let (base_url, state) = spawn_server().await;
    let (_dir, files, draft) = fixtures();
    let host = cli_host(ClientConfig::new(base_url.as_str()), false);

    let reply = commands::run(&host, &files, &draft).await.unwrap();
    assert_eq!(reply.paper_id, Some(7));
    assert_eq!(host.shell.navigated(), Some(format!("{}/preview/7", base_url)));

    let captured = state.lock().unwrap();

    // One part per file, all under the shared key, in selection order.
    let upload = &captured.uploads[0];
    assert_eq!(upload.len(), 2);
    assert!(upload.iter().all(|p| p.name == "files"));
    let names: Vec<_> = upload.iter().filter_map(|p| p.file_name.clone()).collect();
    assert_eq!(names, vec!["notes.txt", "syllabus.txt"]);
    assert_eq!(upload[0].text, "Kinematics: velocity, acceleration");

    // Generation is scoped to the session from the upload redirect.
    let (session, fields) = &captured.generations[0];
    assert_eq!(session, "sess-42");

    let names: HashMap<_, _> = fields.iter().map(|p| (p.name.as_str(), ())).collect();
    for expected in [
        "title",
        "subject",
        "total_marks",
        "difficulty",
        "priority_topics",
        "instructions",
        "question_config",
    ] {
        assert!(names.contains_key(expected), "missing field {}", expected);
    }
    assert_eq!(fields.len(), 7);
    assert_eq!(text(fields, "total_marks"), Some("20"));
    assert_eq!(text(fields, "priority_topics"), Some("Kinematics,Optics"));
    assert_eq!(text(fields, "instructions"), Some(""));

    let config: Value = serde_json::from_str(text(fields, "question_config").unwrap()).unwrap();
    assert_eq!(
        config,
        json!({"question_sets": [
            {"type": "mcq", "marks": 1, "count": 10},
            {"type": "short", "marks": 5, "count": 2}
        ]})
    );
}

#[tokio::test]
async fn test_generate_reports_server_detail() {
    let (base_url, state) = spawn_server().await;
    let (_dir, _files, draft) = fixtures();
    let host = cli_host(ClientConfig::new(base_url.as_str()), false);

    let err = commands::generate(&host, "expired", &draft).await.unwrap_err();
    match err {
        CliError::Submit(SubmitError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message.as_deref(), Some("Session not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(host.shell.navigated(), None);
    assert_eq!(state.lock().unwrap().generations.len(), 1);
}

#[tokio::test]
async fn test_out_of_tolerance_draft_sends_nothing() {
    let (base_url, state) = spawn_server().await;
    let (dir, files, _draft) = fixtures();
    let draft = dir.path().join("bad.json");
    std::fs::write(
        &draft,
        r#"{"total_marks": 100, "question_sets": [{"type": "long", "marks": 10, "count": 2}]}"#,
    )
    .unwrap();
    let host = cli_host(ClientConfig::new(base_url.as_str()), false);

    // The draft passes parsing, so `run` uploads before generation is blocked.
    let err = commands::run(&host, &files, &draft).await.unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
    assert!(err.to_string().contains("20"));
    assert!(err.to_string().contains("100"));

    let captured = state.lock().unwrap();
    assert_eq!(captured.uploads.len(), 1);
    assert!(captured.generations.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let (_dir, files, _draft) = fixtures();
    // Port 9 (discard) on loopback is closed in test environments.
    let host = cli_host(ClientConfig::new("http://127.0.0.1:9"), false);

    let err = commands::upload(&host, &files).await.unwrap_err();
    assert!(matches!(err, CliError::Submit(SubmitError::Transport(_))));
    assert!(err.to_string().starts_with("Network error:"));
}
