//! Startup from a TOML file: built-in health route and static mounts.

use std::sync::Arc;

use patriot_router::config::load_config;
use patriot_router::lifecycle::build_router;

mod common;

#[tokio::test]
async fn test_router_from_config_file() {
    let public = tempfile::tempdir().unwrap();
    std::fs::write(public.path().join("app.js"), "let x = 1;").unwrap();

    let conf_dir = tempfile::tempdir().unwrap();
    let conf_path = conf_dir.path().join("router.toml");
    std::fs::write(
        &conf_path,
        format!(
            r#"
[listener]
bind_address = "127.0.0.1:0"

[cors]
allow_origin = "https://app.example.com"

[health]
path = "/healthz"

[[static_files]]
prefix = "/static"
directory = "{}"
"#,
            public.path().display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();

    let config = load_config(&conf_path).unwrap();
    let router = Arc::new(build_router(&config).unwrap());
    let server = common::spawn_server(&config, router).await;
    let client = common::client();

    let res = client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "https://app.example.com"
    );
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let res = client.get(server.url("/static/app.js")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "https://app.example.com"
    );
    assert_eq!(res.text().await.unwrap(), "let x = 1;");

    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "not found");

    server.stop().await.unwrap();
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "[[static_files]]\nprefix = \"\"\ndirectory = \"./public\"\n",
    )
    .unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("static_files.prefix"));
}
