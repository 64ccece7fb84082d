#![allow(
    clippy::tests_outside_test_module,
    clippy::unwrap_used,
    clippy::impl_trait_in_params,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "This is an integration test."
)]

use std::io::Read;

use assert_cmd::cargo::CommandCargoExt;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const COMMAND_NAME: &str = "numerology-server";

/// Longest text the spawned server accepts, kept small so the limit is cheap to hit.
const MAX_TEXT_LENGTH: usize = 64;

struct ServerInstance {
    process: Option<std::process::Child>,
    stderr_drainer: Option<std::thread::JoinHandle<String>>,
    stdout_drainer: Option<std::thread::JoinHandle<String>>,
    armed: bool,
}

impl ServerInstance {
    pub const fn new(
        process: std::process::Child,
        stderr_drainer: std::thread::JoinHandle<String>,
        stdout_drainer: std::thread::JoinHandle<String>,
    ) -> Self {
        Self {
            process: Some(process),
            stderr_drainer: Some(stderr_drainer),
            stdout_drainer: Some(stdout_drainer),
            armed: true,
        }
    }

    pub fn disarm(mut self) {
        self.armed = false;
        drop(self);
    }
}

impl Drop for ServerInstance {
    fn drop(&mut self) {
        let Self {
            process,
            armed,
            stderr_drainer,
            stdout_drainer,
        } = self;
        let mut process = process.take().expect("To always be Some");

        // SAFETY:
        // 1. We are sending a signal to a valid process id.
        // 2. We are sending a signal that the process is expected to handle.
        #[allow(unsafe_code, reason = "This is a test")]
        unsafe {
            libc::kill(process.id() as i32, libc::SIGINT);
        }

        let output = process.wait().unwrap();
        let stdout = stdout_drainer
            .take()
            .expect("To always be Some")
            .join()
            .unwrap();
        let stderr = stderr_drainer
            .take()
            .expect("To always be Some")
            .join()
            .unwrap();

        if !output.success() | *armed || stderr.contains("panic") || stderr.contains("panicked") {
            panic!(
                "Server exited with status: {}\nstdout:\n{}\nstderr:\n{}",
                output, stdout, stderr
            );
        }
    }
}

/// Read a child stream into a String until it closes, keeping at most the last ~10MB.
fn drain(stream: impl Read + Send + 'static) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut output = String::new();
        let mut buffer = [0; 1024];
        let mut reader = std::io::BufReader::new(stream);
        while let Ok(n) = reader.read(&mut buffer) {
            if n == 0 {
                break;
            }
            output.push_str(String::from_utf8_lossy(&buffer[..n]).as_ref());
            if output.len() > 10_000_000 {
                // remove the first 1_000_000 characters
                output = output.split_off(1_000_000);
            }
        }
        output
    })
}

#[fixture]
fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[fixture]
async fn started_server(free_port: u16) -> (u16, ServerInstance) {
    let mut cmd = std::process::Command::cargo_bin(COMMAND_NAME).unwrap();
    cmd.env_clear()
        // Rust directives
        .env("RUST_LOG", "DEBUG")
        // Server directives
        .env("SERVER__HOST", "127.0.0.1")
        .env("SERVER__PORT", free_port.to_string())
        .env("CALCULATION__MAX_TEXT_LENGTH", MAX_TEXT_LENGTH.to_string())
        .env("CALCULATION__VARIATION_POLICY", "letter-tables");

    let mut handle = cmd
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .unwrap();

    let stdout_handle = drain(handle.stdout.take().unwrap());
    let stderr_handle = drain(handle.stderr.take().unwrap());

    let server_instance = ServerInstance::new(handle, stderr_handle, stdout_handle);

    // Wait for the server to start up by periodically pinging the /health endpoint.
    const MAX_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
    let start = std::time::Instant::now();
    loop {
        if let Ok(response) =
            reqwest::get(&format!("http://127.0.0.1:{}/api/health", free_port)).await
        {
            if response.status().is_success() {
                break;
            }
        }

        if start.elapsed() > MAX_TIMEOUT {
            panic!("Server did not start up in time.");
        }
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    }

    (free_port, server_instance)
}

async fn post(port: u16, path: &str, body: &Value) -> (reqwest::StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://127.0.0.1:{}{}", port, path))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

/// Value a full basmala through both endpoints.
#[rstest]
#[awt]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test]
async fn test_basmala_over_http(#[future] started_server: (u16, ServerInstance)) {
    let (port, started_server) = started_server;

    let (status, body) = post(
        port,
        "/api/numerology",
        &json!({"Text": "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ", "Alphabet": 0, "Type": 0}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK, "body: {body}");
    assert_eq!(body["Normalized"], json!("بسماللهالرحمنالرحيم"));
    assert_eq!(body["Total"], json!(786));
    assert_eq!(body["Alphabet"], json!(0));
    assert_eq!(body["Rows"].as_array().unwrap().len(), 19);
    assert_eq!(body["Variations"]["SmallEbced"], json!(786));

    let (status, legacy) = post(
        port,
        "/api/ebced",
        &json!({"Text": "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ"}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(legacy["Normalized"], body["Normalized"]);
    assert_eq!(legacy["Total"], body["Total"]);
    assert_eq!(legacy["Rows"], body["Rows"]);
    assert!(legacy.get("Variations").is_none());

    started_server.disarm();
}

/// Hebrew and Greek totals, with the variant ignored.
#[rstest]
#[awt]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test]
async fn test_other_alphabets_over_http(#[future] started_server: (u16, ServerInstance)) {
    let (port, started_server) = started_server;

    let (status, body) = post(
        port,
        "/api/numerology",
        &json!({"Text": "שלום", "Alphabet": 1, "Type": 3}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["Total"], json!(376));
    assert_eq!(body["Variations"], Value::Null);

    let (status, body) = post(
        port,
        "/api/numerology",
        &json!({"Text": "Ι\u{0313}ησου\u{0342}ς", "Alphabet": 2}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["Normalized"], json!("Ιησους"));
    assert_eq!(body["Total"], json!(888));

    started_server.disarm();
}

/// Validation failures come back as `{"Message": ...}` with a 400.
#[rstest]
#[awt]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test]
async fn test_validation_errors_over_http(#[future] started_server: (u16, ServerInstance)) {
    let (port, started_server) = started_server;

    let (status, body) = post(port, "/api/numerology", &json!({"Text": "   "})).await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"Message": "Text must not be empty"}));

    let at_limit = "ا".repeat(MAX_TEXT_LENGTH);
    let (status, body) = post(port, "/api/ebced", &json!({"Text": at_limit})).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["Total"], json!(MAX_TEXT_LENGTH));

    let over_limit = "ا".repeat(MAX_TEXT_LENGTH + 1);
    let (status, body) = post(port, "/api/ebced", &json!({"Text": over_limit})).await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    insta::assert_snapshot!(body.to_string(), @r#"{"Message":"Text is too long (maximum 64 characters)"}"#);

    started_server.disarm();
}

/// The index page is rendered and lists every alphabet.
#[rstest]
#[awt]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test]
async fn test_index_page_over_http(#[future] started_server: (u16, ServerInstance)) {
    let (port, started_server) = started_server;

    let response = reqwest::get(&format!("http://127.0.0.1:{}/", port))
        .await
        .unwrap();
    assert!(response.status().is_success());
    let page = response.text().await.unwrap();
    for name in ["Ebced", "Gematria", "Isopsephy"] {
        assert!(page.contains(name), "index page should mention {name}");
    }
    assert!(page.contains(&MAX_TEXT_LENGTH.to_string()));

    started_server.disarm();
}
