use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Run the binary in a temp directory with a controlled environment.
///
/// The empty `.env` stops dotenv from walking up into parent directories.
fn run(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(dir.path().join(".env"), "").expect("Failed to write .env");
    let mut command = Command::new(env!("CARGO_BIN_EXE_lostfound"));
    command
        .args(args)
        .current_dir(dir.path())
        .env_remove("SHOPIFY_SHOP_NAME")
        .env_remove("SHOPIFY_ADMIN_TOKEN")
        .env_remove("SHOPIFY_API_VERSION")
        .env_remove("LOSTFOUND_STORE_ENDPOINT")
        .env_remove("LOSTFOUND_METAOBJECT_TYPE")
        .env_remove("LOSTFOUND_CONFIG")
        .env_remove("LOSTFOUND_HOST")
        .env_remove("LOSTFOUND_LOG_JSON")
        .env_remove("PORT");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("Failed to execute lostfound")
}

#[test]
fn test_config_show_json_masks_token() {
    let output = run(
        &["config", "show", "--json"],
        &[
            ("SHOPIFY_SHOP_NAME", "pawprints"),
            ("SHOPIFY_ADMIN_TOKEN", "shpat_abcdef123456"),
            ("PORT", "8081"),
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("shpat_abcdef123456"));

    let json: Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["store"]["shop"], "pawprints");
    assert_eq!(json["store"]["access_token"], "sh...56");
    assert_eq!(
        json["store"]["endpoint"],
        "https://pawprints.myshopify.com/admin/api/2023-10/graphql.json"
    );
    assert_eq!(json["server"]["port"], 8081);
}

#[test]
fn test_config_show_reads_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.yaml");
    std::fs::write(
        &path,
        "store:\n  shop: from-file\n  metaobject_type: pet_profile\n",
    )
    .unwrap();

    let output = run(
        &["--config", path.to_str().unwrap(), "config", "show", "--json"],
        &[],
    );
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["store"]["shop"], "from-file");
    assert_eq!(json["store"]["metaobject_type"], "pet_profile");
    assert!(json["store"]["access_token"].is_null());
}

#[test]
fn test_mark_lost_blank_handle_fails() {
    let output = run(
        &["mark-lost", " "],
        &[
            ("SHOPIFY_SHOP_NAME", "pawprints"),
            ("SHOPIFY_ADMIN_TOKEN", "shpat_abcdef123456"),
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing 'handle'"), "stderr: {stderr}");
}

#[test]
fn test_mark_found_without_token_fails() {
    let output = run(&["mark-found", "rex"], &[("SHOPIFY_SHOP_NAME", "pawprints")]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("access token"), "stderr: {stderr}");
}
