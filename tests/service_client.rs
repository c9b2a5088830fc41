//! ServiceClient against a throwaway HTTP backend bound to an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use resume_screen::core::{Backend, ServiceClient};
use resume_screen::types::job::{MIME_DOCX, MIME_PDF};
use resume_screen::{JobDetails, JobId, ResumeFile, Step, Wizard, WizardCommand, WizardError};

#[derive(Debug, Default, Clone)]
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
    job_id: Option<String>,
}

type Captured = Arc<Mutex<Vec<Upload>>>;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn capture_upload(mut multipart: Multipart) -> Upload {
    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                upload.file_name = field.file_name().map(str::to_string);
                upload.content_type = field.content_type().map(str::to_string);
                upload.bytes = field.bytes().await.unwrap().to_vec();
            }
            Some("job_id") => upload.job_id = Some(field.text().await.unwrap()),
            _ => {}
        }
    }
    upload
}

/// Backend whose `/api/analyze` always answers `status` + `body`.
async fn analyze_backend(status: StatusCode, body: Value) -> (String, Captured) {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(
            "/api/job",
            post(|Json(_): Json<Value>| async {
                Json(json!({"job_id": "abc123", "message": "Job details saved successfully"}))
            }),
        )
        .route(
            "/api/analyze",
            post(
                move |State(captured): State<Captured>, multipart: Multipart| async move {
                    let upload = capture_upload(multipart).await;
                    captured.lock().unwrap().push(upload);
                    (status, Json(body))
                },
            ),
        )
        .with_state(captured.clone());
    (spawn(app).await, captured)
}

fn good_result() -> Value {
    json!({
        "score": 85,
        "summary": "Great fit",
        "strengths": ["X"],
        "gaps": [],
        "extracted_info": {
            "name": "A",
            "email": "a@b.com",
            "experience": [],
            "education": [],
            "skills": ["Go"]
        }
    })
}

#[tokio::test]
async fn submit_job_returns_backend_id() {
    let received: Arc<Mutex<Option<Value>>> = Arc::default();
    let sink = received.clone();
    let app = Router::new().route(
        "/api/job",
        post(move |Json(body): Json<Value>| async move {
            *sink.lock().unwrap() = Some(body);
            Json(json!({"job_id": "abc123", "message": "Job details saved successfully"}))
        }),
    );
    let base = spawn(app).await;

    let client = ServiceClient::new(format!("{}/", base)).unwrap();
    let job_id = client
        .submit_job(&JobDetails::new("Engineer", "Build things"))
        .await
        .unwrap();

    assert_eq!(job_id, JobId::new("abc123"));
    assert_eq!(
        received.lock().unwrap().clone(),
        Some(json!({"title": "Engineer", "description": "Build things"}))
    );
}

#[tokio::test]
async fn submit_job_non_2xx_is_transport_error() {
    let app = Router::new().route(
        "/api/job",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = ServiceClient::new(spawn(app).await).unwrap();

    let err = client
        .submit_job(&JobDetails::new("Engineer", "Build things"))
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::Transport(_)));
}

#[tokio::test]
async fn submit_job_without_id_is_transport_error() {
    let app = Router::new().route(
        "/api/job",
        post(|| async { Json(json!({"message": "saved"})) }),
    );
    let client = ServiceClient::new(spawn(app).await).unwrap();

    let err = client
        .submit_job(&JobDetails::new("Engineer", "Build things"))
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::Transport(_)));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ServiceClient::new(format!("http://{}", addr)).unwrap();
    let err = client
        .submit_job(&JobDetails::new("Engineer", "Build things"))
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::Transport(_)));
}

#[tokio::test]
async fn analyze_sends_multipart_and_parses_result() {
    let (base, captured) = analyze_backend(StatusCode::OK, good_result()).await;
    let client = ServiceClient::new(base).unwrap();
    let file = ResumeFile::new("jane.pdf", MIME_PDF, b"%PDF-1.4 resume".to_vec());

    let result = client
        .submit_resume_for_analysis(&JobId::new("abc123"), &file)
        .await
        .unwrap();

    assert_eq!(result.score, 85);
    assert_eq!(result.extracted_info.skills, vec!["Go"]);

    let uploads = captured.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name.as_deref(), Some("jane.pdf"));
    assert_eq!(uploads[0].content_type.as_deref(), Some(MIME_PDF));
    assert_eq!(uploads[0].bytes, b"%PDF-1.4 resume");
    assert_eq!(uploads[0].job_id.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn analyze_embedded_error_is_application_error() {
    let (base, _) = analyze_backend(StatusCode::OK, json!({"error": "parsing failed"})).await;
    let client = ServiceClient::new(base).unwrap();
    let file = ResumeFile::new("cv.docx", MIME_DOCX, vec![1, 2, 3]);

    let err = client
        .submit_resume_for_analysis(&JobId::new("abc123"), &file)
        .await
        .unwrap_err();
    assert_eq!(err, WizardError::Application("parsing failed".to_string()));
}

#[tokio::test]
async fn analyze_error_status_is_transport_error() {
    let (base, _) =
        analyze_backend(StatusCode::BAD_REQUEST, json!({"error": "Invalid job ID"})).await;
    let client = ServiceClient::new(base).unwrap();
    let file = ResumeFile::new("cv.pdf", MIME_PDF, vec![1]);

    let err = client
        .submit_resume_for_analysis(&JobId::new("unknown"), &file)
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::Transport(_)));
}

#[tokio::test]
async fn analyze_malformed_payload_is_transport_error() {
    let (base, _) = analyze_backend(StatusCode::OK, json!({"summary": "no score here"})).await;
    let client = ServiceClient::new(base).unwrap();
    let file = ResumeFile::new("cv.pdf", MIME_PDF, vec![1]);

    let err = client
        .submit_resume_for_analysis(&JobId::new("abc123"), &file)
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::Transport(_)));
}

#[tokio::test]
async fn analyze_blank_score_reaches_results_as_poor_match() {
    let body = json!({
        "score": "",
        "summary": "",
        "strengths": [],
        "gaps": [],
        "extracted_info": {"name": "", "email": "", "experience": [], "education": [], "skills": []}
    });
    let (base, _) = analyze_backend(StatusCode::OK, body).await;
    let mut wizard = Wizard::new(ServiceClient::new(base).unwrap());

    wizard
        .handle(WizardCommand::SubmitJob {
            title: "Engineer".to_string(),
            description: "Build things".to_string(),
        })
        .await;
    let state = wizard
        .upload_resume(ResumeFile::new("cv.pdf", MIME_PDF, b"resume".to_vec()))
        .await;

    assert_eq!(state.step, Step::ViewingResults);
    let result = state.analysis_result.as_ref().unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.match_level().label(), "Poor Match");
}

#[tokio::test]
async fn wizard_over_http_reaches_results() {
    let (base, captured) = analyze_backend(StatusCode::OK, good_result()).await;
    let mut wizard = Wizard::new(ServiceClient::new(base).unwrap());

    wizard
        .handle(WizardCommand::SubmitJob {
            title: "Engineer".to_string(),
            description: "Build things".to_string(),
        })
        .await;
    assert_eq!(wizard.state().step, Step::UploadingResume);
    assert_eq!(wizard.state().job_id, Some(JobId::new("abc123")));

    // oversized upload never reaches the server
    wizard
        .upload_resume(ResumeFile::new("big.pdf", MIME_PDF, vec![0; 6 * 1024 * 1024]))
        .await;
    assert_eq!(wizard.state().step, Step::UploadingResume);
    assert!(captured.lock().unwrap().is_empty());

    wizard.handle(WizardCommand::DismissError).await;
    let state = wizard
        .upload_resume(ResumeFile::new("cv.pdf", MIME_PDF, b"resume".to_vec()))
        .await;
    assert_eq!(state.step, Step::ViewingResults);
    assert_eq!(state.error_message, None);
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn wizard_over_http_embedded_error_stays_on_upload() {
    let (base, _) = analyze_backend(StatusCode::OK, json!({"error": "parsing failed"})).await;
    let mut wizard = Wizard::new(ServiceClient::new(base).unwrap());

    wizard
        .handle(WizardCommand::SubmitJob {
            title: "Engineer".to_string(),
            description: "Build things".to_string(),
        })
        .await;
    let state = wizard
        .upload_resume(ResumeFile::new("cv.pdf", MIME_PDF, b"resume".to_vec()))
        .await;

    assert_eq!(state.step, Step::UploadingResume);
    assert!(!state.is_loading);
    assert_eq!(
        state.error_message.as_deref(),
        Some("Failed to analyze resume. Please try again.")
    );
}
