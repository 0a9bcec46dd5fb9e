use assert_cmd::Command;
use axum::{extract::{Path, State}, routing::get, Json, Router};
use predicates::str::contains;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type Seen = Arc<Mutex<Vec<Value>>>;

async fn list_buildpacks() -> Json<Value> { Json(json!({"resources": [{"guid": "bp-guid"}]})) }

async fn get_buildpack(Path(guid): Path<String>) -> Json<Value> {
    Json(json!({"guid": guid, "name": "java", "metadata": {"labels": {}, "annotations": {"owner": "team-a", "note": null}}}))
}

async fn patch_buildpack(State(seen): State<Seen>, Path(guid): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(body.clone());
    Json(json!({"guid": guid, "metadata": body["metadata"].clone()}))
}

async fn spawn() -> (String, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/v3/buildpacks", get(list_buildpacks))
        .route("/v3/buildpacks/:guid", get(get_buildpack).patch(patch_buildpack))
        .with_state(seen.clone());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{}:{}", addr.ip(), addr.port()), seen)
}

/// Writes a platform CLI config pointing at `base` and returns the CF_HOME dir.
fn logged_in_home(base: &str) -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join(".cf");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg = json!({"ConfigVersion": 3, "Target": base, "AccessToken": "bearer test", "OrganizationFields": {"GUID": "o"}, "SpaceFields": {"GUID": "s"}});
    std::fs::write(dir.join("config.json"), cfg.to_string()).unwrap();
    tmp
}

fn bin(home: &std::path::Path) -> Command {
    let mut c = Command::cargo_bin("cf-annotations").unwrap();
    c.env("CF_HOME", home).env("XDG_CONFIG_HOME", home).env_remove("CF_ANNOTATIONS_API").env_remove("CF_ANNOTATIONS_TOKEN");
    c
}

#[tokio::test(flavor = "multi_thread")]
async fn set_then_view_buildpack() {
    let (base, seen) = spawn().await;
    let home = logged_in_home(&base);
    let path = home.path().to_path_buf();

    tokio::task::spawn_blocking(move || {
        bin(&path).args(["set-annotation", "buildpack", "java", "-s", "cflinuxfs4", "owner=team-a"])
            .assert().success().stdout(contains("\"owner\": \"team-a\""));
        bin(&path).args(["annotations", "Buildpack", "java"])
            .assert().success().stdout("Buildpack: java\n\nAnnotations:\n\nnote: \n\nowner: team-a\n\n");
        bin(&path).args(["--output", "json", "annotations", "buildpack", "java"])
            .assert().success().stdout(contains("\"guid\": \"bp-guid\""));
    }).await.unwrap();

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen, vec![json!({"metadata": {"labels": {}, "annotations": {"owner": "team-a"}}})]);
}
