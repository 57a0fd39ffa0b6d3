//! Integration tests for the music provider client against a mock upstream.

use assert_matches::assert_matches;
use serde_json::json;
use songbridge_core::polling::PollSettings;
use songbridge_core::types::{CoverRequest, GenerationRequest};
use songbridge_provider::{poll_until_done, MusicApi, PollError, UpstreamError};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> MusicApi {
    MusicApi::new(reqwest::Client::new(), &server.uri(), "test-key")
}

// ---------------------------------------------------------------------------
// Test: launch returns the job handle from the body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_returns_job_id_and_status_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({ "customMode": false, "prompt": "lofi chill beat" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobId": "abc",
            "statusUrl": "https://status.example/abc",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let job = client(&server)
        .launch(&GenerationRequest::simple("lofi chill beat"))
        .await
        .unwrap();

    assert_eq!(job.job_id, "abc");
    assert_eq!(job.status_url, "https://status.example/abc");
}

// ---------------------------------------------------------------------------
// Test: status URL is synthesized when the body omits it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_synthesizes_status_url_from_nested_task_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 200, "data": { "taskId": "t-42" } })),
        )
        .mount(&server)
        .await;

    let job = client(&server)
        .launch(&GenerationRequest::simple("beat"))
        .await
        .unwrap();

    assert_eq!(job.job_id, "t-42");
    assert_eq!(job.status_url, format!("{}/task/t-42", server.uri()));
}

// ---------------------------------------------------------------------------
// Test: 2xx without a job id is an upstream error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_without_job_id_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "msg": "accepted" })))
        .mount(&server)
        .await;

    let err = client(&server)
        .launch(&GenerationRequest::simple("beat"))
        .await
        .unwrap_err();

    assert_matches!(err, UpstreamError::Malformed { status: 200, .. });
    assert_eq!(err.body_json()["msg"], "accepted");
}

// ---------------------------------------------------------------------------
// Test: non-2xx launch keeps the upstream status and body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_rejection_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "msg": "bad key" })))
        .mount(&server)
        .await;

    let err = client(&server)
        .launch(&GenerationRequest::simple("beat"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.body_json()["msg"], "bad key");
}

// ---------------------------------------------------------------------------
// Test: task_status returns the raw body, and errors on non-2xx
// ---------------------------------------------------------------------------

#[tokio::test]
async fn task_status_reads_task_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "status": "processing" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/task/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let api = client(&server);
    let body = api.task_status("abc").await.unwrap();
    assert_eq!(body["status"], "processing");

    let err = api.task_status("missing").await.unwrap_err();
    assert_matches!(err, UpstreamError::Status { status: 404, ref body } => {
        assert_eq!(body, "not found");
    });
}

// ---------------------------------------------------------------------------
// Test: cover start sends upload and callback URLs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_cover_adds_upload_and_callback_urls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cover"))
        .and(body_json(json!({
            "customMode": false,
            "prompt": "jazzy",
            "uploadUrl": "https://x/in.mp3",
            "callBackUrl": "https://me.example/cover/callback",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "data": { "taskId": "c1" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = CoverRequest {
        upload_url: "https://x/in.mp3".into(),
        params: GenerationRequest::simple("jazzy"),
    };
    let ack = client(&server)
        .start_cover(&request, Some("https://me.example/cover/callback"))
        .await
        .unwrap();

    assert_eq!(ack["data"]["taskId"], "c1");
}

// ---------------------------------------------------------------------------
// Test: poll loop over HTTP stops on the first successful done
// ---------------------------------------------------------------------------

#[tokio::test]
async fn poll_over_http_completes_after_processing_snapshots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "status": "processing" })),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/task/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "done",
            "records": [{ "id": "r1", "audioUrl": "https://x/1.mp3" }],
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let job = songbridge_core::types::JobHandle {
        job_id: "abc".into(),
        status_url: api.status_url("abc"),
    };
    let settings = PollSettings {
        timeout: Duration::from_secs(5),
        interval: Duration::from_millis(50),
    };

    let done = poll_until_done(&api, &job, settings).await.unwrap();
    assert_eq!(done.polls, 3);
    assert_eq!(done.status.records[0].audio_url, "https://x/1.mp3");
}

#[tokio::test]
async fn poll_over_http_aborts_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/abc"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let job = songbridge_core::types::JobHandle {
        job_id: "abc".into(),
        status_url: api.status_url("abc"),
    };
    let settings = PollSettings {
        timeout: Duration::from_secs(5),
        interval: Duration::from_millis(20),
    };

    let err = poll_until_done(&api, &job, settings).await.unwrap_err();
    assert_matches!(err, PollError::Upstream(UpstreamError::Status { status: 502, .. }));
}
