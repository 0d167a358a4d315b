// HTTP contract tests against a mock service.
// Run with: cargo test -p prospetti-client --test contract

use httpmock::prelude::*;

use prospetti_client::{ApiClient, ApiError};
use prospetti_core::{assemble, ParsingConfig, Preset, SessionState};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.base_url()).unwrap()
}

#[test]
fn extract_sends_multipart_with_mode_and_parsing() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/extract")
            .body_includes("name=\"file\"")
            .body_includes("buste_giugno.pdf")
            .body_includes("name=\"mode\"")
            .body_includes("ocr")
            .body_includes("name=\"parsing\"")
            .body_includes("\"decimalSeparator\":\",\"");
        then.status(200).json_body(serde_json::json!({
            "uploadId": "up-7",
            "rows": [{
                "id": "r1",
                "name": "Mario Rossi",
                "role": "OS",
                "ordinaryHours": "160,0",
                "overtimeHours": "4",
                "onCallHours": "0",
                "netPay": "1.250,00"
            }],
            "warnings": ["page 2 low contrast"]
        }));
    });

    let resp = client(&server)
        .extract("buste_giugno.pdf", b"%PDF-1.4".to_vec(), "ocr", &ParsingConfig::italian())
        .unwrap();

    mock.assert();
    assert_eq!(resp.upload_id.as_deref(), Some("up-7"));
    assert_eq!(resp.rows.len(), 1);
    assert_eq!(resp.rows[0].net_pay, "1.250,00");
    assert_eq!(resp.warnings, vec!["page 2 low contrast"]);
}

#[test]
fn extract_without_rows_defaults_to_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/extract");
        then.status(200).json_body(serde_json::json!({ "uploadId": "up-8" }));
    });

    let resp = client(&server)
        .extract("a.pdf", vec![1, 2, 3], "text", &ParsingConfig::italian())
        .unwrap();
    assert!(resp.rows.is_empty());
    assert!(resp.confidence_log.is_empty());
}

#[test]
fn fetch_rows_accepts_wrapped_and_absent_arrays() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/uploads/up-7/rows");
        then.status(200).json_body(serde_json::json!({
            "rows": [{
                "id": "r1",
                "name": "Mario Rossi",
                "role": "OS",
                "ordinaryHours": "160",
                "overtimeHours": "0",
                "onCallHours": "0",
                "netPay": "1200",
                "risk": "none"
            }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/uploads/empty/rows");
        then.status(200).json_body(serde_json::json!({}));
    });

    let api = client(&server);
    let rows = api.fetch_rows("up-7").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].risk, Some(prospetti_core::RiskLabel::None));

    let empty = api.fetch_rows("empty").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn save_rows_posts_risk_labels() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/uploads/up-7/rows")
            .body_includes("\"risk\":\"missing-data\"");
        then.status(204);
    });

    let mut state = SessionState::default();
    state.add_row("Mario Rossi");
    state.reclassify_all();

    client(&server).save_rows("up-7", &state.rows).unwrap();
    mock.assert();
}

#[test]
fn config_save_and_fetch_round_trip() {
    let server = MockServer::start();

    let mut state = SessionState::default();
    state.apply_preset(&Preset::builtin());
    state.config_name = "giugno".into();
    let doc = assemble(&state);

    let save = server.mock(|when, then| {
        when.method(POST)
            .path("/api/configs")
            .json_body_obj(&doc);
        then.status(201);
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/configs/giugno");
        then.status(200).json_body_obj(&doc);
    });

    let api = client(&server);
    api.save_config(&doc).unwrap();
    save.assert();

    let fetched = api.fetch_config("giugno").unwrap();
    assert_eq!(fetched, doc);
}

#[test]
fn compute_posts_upload_config_and_rows() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/compute")
            .body_includes("\"uploadId\":\"up-7\"")
            .body_includes("\"config\"")
            .body_includes("\"rows\"");
        then.status(200).json_body(serde_json::json!({
            "allocations": [{"name": "MARIO ROSSI", "network": "RETE1", "hours": 7.5}],
            "warnings": []
        }));
    });

    let mut state = SessionState::default();
    state.apply_preset(&Preset::builtin());
    let doc = assemble(&state);

    let resp = client(&server).compute("up-7", &doc, &state.rows).unwrap();
    mock.assert();
    assert_eq!(resp.allocations.len(), 1);
    assert!(resp.pivot.is_empty());
}

#[test]
fn export_downloads_binary_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/export")
            .query_param("uploadId", "up-7")
            .query_param("config", "giugno");
        then.status(200)
            .header("content-type", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            .body(&[0x50, 0x4b, 0x03, 0x04, 0x00]);
    });

    let bytes = client(&server).export("up-7", Some("giugno")).unwrap();
    assert_eq!(&bytes[..4], &[0x50, 0x4b, 0x03, 0x04]);
}

#[test]
fn non_2xx_body_is_surfaced_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/configs/missing");
        then.status(404).body("Config 'missing' not found. Save it first.");
    });

    let err = client(&server).fetch_config("missing").unwrap_err();
    match err {
        ApiError::Http(404, body) => {
            assert_eq!(body, "Config 'missing' not found. Save it first.");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[test]
fn unreachable_service_is_a_network_error() {
    // Port 9 (discard) is never listening locally.
    let api = ApiClient::new("http://127.0.0.1:9").unwrap();
    let err = api.fetch_rows("up-1").unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}
