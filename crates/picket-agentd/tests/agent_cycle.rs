//! End-to-end cycle tests: the real agent loop against an in-process
//! controller, with probe execution behind a scripted runtime where the test
//! doesn't need a genuine shared object.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;

use picket_agentd::{Agent, AgentConfig, platform};
use picket_control::{ControlClient, ControlConfig};
use picket_exec::{ExecResult, NativeRuntime, Runtime};

const TASK_ID: &str = "11111111-1111-1111-1111-111111111111";

/// Scripted controller: pops one canned response per request, records every
/// request body, answers `200` with an empty body once the script runs dry.
#[derive(Clone, Default)]
struct Controller {
    bodies: Arc<Mutex<Vec<String>>>,
    script: Arc<Mutex<VecDeque<(StatusCode, Vec<u8>)>>>,
}

impl Controller {
    fn push(&self, status: StatusCode, body: Vec<u8>) {
        self.script.lock().unwrap().push_back((status, body));
    }

    fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn handle(State(state): State<Controller>, body: Bytes) -> (StatusCode, Vec<u8>) {
    state
        .bodies
        .lock()
        .unwrap()
        .push(String::from_utf8_lossy(&body).into_owned());
    state
        .script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::OK, Vec::new()))
}

async fn start_controller(state: Controller) -> String {
    let app = Router::new().route("/", post(handle)).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

fn agent_config(endpoint: String, work_dir: &Path, max_cycles: u64) -> AgentConfig {
    AgentConfig {
        control: ControlConfig {
            endpoint,
            token: "test-token".to_string(),
        },
        os: platform().to_string(),
        work_dir: work_dir.to_path_buf(),
        interval: Duration::from_millis(5),
        max_cycles: Some(max_cycles),
    }
}

fn task_body(payload: &[u8]) -> Vec<u8> {
    let mut body = TASK_ID.as_bytes().to_vec();
    body.extend_from_slice(hex::encode(payload).as_bytes());
    body
}

/// Runtime stand-in that always "succeeds" with a fixed exit code.
struct FixedExit(i32);

impl Runtime for FixedExit {
    fn execute(&self, _artifact: &Path) -> ExecResult<i32> {
        Ok(self.0)
    }
}

/// Runtime stand-in that records what it was handed.
#[derive(Clone, Default)]
struct Recording {
    seen: Arc<Mutex<Option<(PathBuf, Vec<u8>)>>>,
}

impl Runtime for Recording {
    fn execute(&self, artifact: &Path) -> ExecResult<i32> {
        let contents = std::fs::read(artifact).unwrap();
        *self.seen.lock().unwrap() = Some((artifact.to_path_buf(), contents));
        Ok(3)
    }
}

#[tokio::test]
async fn completed_probe_reports_on_the_next_exchange() {
    let controller = Controller::default();
    controller.push(StatusCode::OK, task_body(b"pretend shared object"));
    let endpoint = start_controller(controller.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    let config = agent_config(endpoint, dir.path(), 2);
    let client = ControlClient::new(&config.control).unwrap();
    Agent::new(config, client, FixedExit(0)).run().await;

    let bodies = controller.bodies();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], platform());

    let prefix = format!("{}:{TASK_ID}:0:", platform());
    assert!(
        bodies[1].starts_with(&prefix),
        "unexpected report line: {}",
        bodies[1]
    );
    let cpu_seconds: f64 = bodies[1][prefix.len()..].parse().unwrap();
    assert!(cpu_seconds >= 0.0);
}

#[tokio::test]
async fn artifact_is_staged_for_the_runtime_and_released_after() {
    let payload: &[u8] = b"\x7fELF not really";
    let controller = Controller::default();
    controller.push(StatusCode::OK, task_body(payload));
    let endpoint = start_controller(controller.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    let runtime = Recording::default();
    let config = agent_config(endpoint, dir.path(), 2);
    let client = ControlClient::new(&config.control).unwrap();
    Agent::new(config, client, runtime.clone()).run().await;

    let (path, contents) = runtime.seen.lock().unwrap().take().expect("probe never ran");
    assert_eq!(contents, payload);
    assert!(!path.exists(), "artifact survived the cycle");

    // The runtime's exit code lands in the report.
    let bodies = controller.bodies();
    assert!(bodies[1].starts_with(&format!("{}:{TASK_ID}:3:", platform())));
}

#[tokio::test]
async fn rejected_exchange_backs_off_and_requeries_with_os() {
    let controller = Controller::default();
    controller.push(StatusCode::NOT_FOUND, b"no such agent".to_vec());
    let endpoint = start_controller(controller.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    let config = agent_config(endpoint, dir.path(), 2);
    let client = ControlClient::new(&config.control).unwrap();
    Agent::new(config, client, NativeRuntime).run().await;

    // No report was ever formed; both requests are the bare OS identifier.
    assert_eq!(controller.bodies(), vec![platform(), platform()]);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn malformed_payload_is_discarded_without_a_report() {
    let controller = Controller::default();
    // Odd-length hex after the id.
    let mut body = TASK_ID.as_bytes().to_vec();
    body.extend_from_slice(b"abc");
    controller.push(StatusCode::OK, body);
    let endpoint = start_controller(controller.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    let config = agent_config(endpoint, dir.path(), 2);
    let client = ControlClient::new(&config.control).unwrap();
    Agent::new(config, client, NativeRuntime).run().await;

    assert_eq!(controller.bodies(), vec![platform(), platform()]);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn corrupt_probe_yields_no_report_and_no_leftover_artifact() {
    let controller = Controller::default();
    controller.push(StatusCode::OK, task_body(b"garbage, not loadable"));
    let endpoint = start_controller(controller.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    let config = agent_config(endpoint, dir.path(), 2);
    let client = ControlClient::new(&config.control).unwrap();
    Agent::new(config, client, NativeRuntime).run().await;

    assert_eq!(controller.bodies(), vec![platform(), platform()]);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn idle_cycles_keep_polling_with_os() {
    let controller = Controller::default();
    let endpoint = start_controller(controller.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    let config = agent_config(endpoint, dir.path(), 3);
    let client = ControlClient::new(&config.control).unwrap();
    Agent::new(config, client, NativeRuntime).run().await;

    assert_eq!(controller.bodies(), vec![platform(); 3]);
}
