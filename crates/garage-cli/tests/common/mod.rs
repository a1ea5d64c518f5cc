use std::process::{Command, Output};
use std::sync::Arc;

use garage_core::DocumentStore;
use garage_file::FileStore;
use garage_server::{Inventory, router};
use tempfile::TempDir;

/// An API server over a throwaway file store, running on its own runtime.
pub struct TestServer {
    pub url: String,
    _runtime: tokio::runtime::Runtime,
    _dir: TempDir,
}

impl TestServer {
    pub fn start() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");

        let store = FileStore::new(dir.path(), "my-garage");
        let url = runtime.block_on(async move {
            store
                .ensure_database()
                .await
                .expect("Failed to create database");

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind");
            let addr = listener.local_addr().expect("No local address");
            let app = router(Arc::new(Inventory::new(store)));
            tokio::spawn(async move {
                axum::serve(listener, app).await.expect("Server failed");
            });
            format!("http://{addr}")
        });

        Self {
            url,
            _runtime: runtime,
            _dir: dir,
        }
    }
}

/// Run the CLI binary against the given API.
pub fn run_cli(args: &[&str], api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_garage"));
    cmd.args(args);
    cmd.env("GARAGE_API", api);
    cmd.env("NO_COLOR", "1");
    cmd.env("CLICOLOR", "0");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], api: &str) -> String {
    let output = run_cli(args, api);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], api: &str) -> String {
    let output = run_cli(args, api);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Full set of flags for a valid `add`.
pub const COROLLA: &[&str] = &[
    "--brand",
    "Toyota",
    "--model",
    "Corolla",
    "--year",
    "2020",
    "--color",
    "Blue",
    "--engine",
    "I4",
    "--license-plate",
    "ABC123",
    "--owner-name",
    "Jane",
    "--owner-contact",
    "555-0100",
];

/// Add the Corolla and return its id.
pub fn add_corolla(api: &str) -> String {
    let mut args = vec!["add"];
    args.extend_from_slice(COROLLA);
    let stdout = run_cli_success(&args, api);

    stdout
        .lines()
        .find_map(|line| line.strip_prefix("ID: "))
        .expect("add did not print an id")
        .trim()
        .to_string()
}

/// List vehicles as JSON documents.
pub fn list_json(api: &str) -> Vec<serde_json::Value> {
    let stdout = run_cli_success(&["list", "--json"], api);
    serde_json::from_str(&stdout).expect("list --json is not a JSON array")
}
