use aerius_report::{
    config::Config,
    connect::{ConnectApi, HttpConnect},
};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// HttpConnect is blocking, so the mock server runs on a runtime we hold on
// to; its accept loop keeps running on the worker threads.
fn start_server() -> (Runtime, MockServer) {
    let rt = Runtime::new().expect("tokio runtime");
    let server = rt.block_on(MockServer::start());
    (rt, server)
}

fn config_for(server: &MockServer) -> Config {
    let mut cfg = Config::default();
    cfg.connect.base_url = server.uri();
    cfg.connect.api_key = "test-key".into();
    cfg
}

#[test]
fn submit_returns_job_key_verbatim() {
    let (rt, server) = start_server();
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/wnb/calculate"))
            .and(header("api-key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"jobKey": "abc123"})),
            )
            .mount(&server),
    );

    let client = HttpConnect::new(&config_for(&server)).unwrap();
    let job_key = client.submit("test2.gml", b"<gml/>".to_vec()).unwrap();
    assert_eq!(job_key, "abc123");
}

#[test]
fn submit_without_job_key_in_response_fails() {
    let (rt, server) = start_server();
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/wnb/calculate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "nope"})),
            )
            .mount(&server),
    );

    let client = HttpConnect::new(&config_for(&server)).unwrap();
    let err = client.submit("test2.gml", b"<gml/>".to_vec()).unwrap_err();
    assert!(err.to_string().contains("parsing submit response"));
}

#[test]
fn status_is_passed_through_unmodified() {
    let (rt, server) = start_server();
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/jobs/abc123"))
            .and(header("api-key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "RUNNING"})),
            )
            .mount(&server),
    );

    let client = HttpConnect::new(&config_for(&server)).unwrap();
    assert_eq!(client.job_status("abc123").unwrap(), "RUNNING");
}

#[test]
fn download_overwrites_destination_byte_for_byte() {
    let (rt, server) = start_server();
    let archive: &[u8] = &[0x50, 0x4b, 0x03, 0x04, 0xff, 0x00, 0x7f];
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/jobs/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "COMPLETED",
                "resultUrl": format!("{}/archive/report.zip", server.uri()),
            })))
            .mount(&server),
    );
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/archive/report.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("output.zip");
    std::fs::write(&dest, b"stale previous run").unwrap();

    let client = HttpConnect::new(&config_for(&server)).unwrap();
    client.download_result("abc123", &dest).unwrap();
    assert_eq!(std::fs::read(&dest).unwrap(), archive);
}

#[test]
fn download_fails_when_result_url_is_absent() {
    let (rt, server) = start_server();
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/jobs/abc123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "RUNNING"})),
            )
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let client = HttpConnect::new(&config_for(&server)).unwrap();
    let err = client
        .download_result("abc123", &dir.path().join("output.zip"))
        .unwrap_err();
    assert!(err.to_string().contains("no resultUrl"));
}

#[test]
fn request_api_key_posts_the_email() {
    let (rt, server) = start_server();
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/user/generateApiKey"))
            .and(body_json(serde_json::json!({"email": "user@example.org"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server),
    );

    let client = HttpConnect::new(&config_for(&server)).unwrap();
    client.request_api_key("user@example.org").unwrap();
    rt.block_on(server.verify());
}
