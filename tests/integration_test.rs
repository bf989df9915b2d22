use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const MANIFEST: &str = r#"{
    "latest": {
        "version": "1.4.0",
        "release_date": "2021-05-01",
        "article_link": "https://medium.com/@example/electrumsv-1-4-0",
        "extra_text": "Requires macOS 10.13 or later.",
        "files": [
            {
                "class_name": "icon-exe",
                "title": "Windows installer",
                "text": "Windows installer",
                "file_name": "ElectrumSV-1.4.0.exe",
                "size_text": "42.3 MB"
            },
            {
                "class_name": "icon-dmg",
                "title": "macOS disk image",
                "text": "macOS",
                "file_name": "ElectrumSV-1.4.0.dmg",
                "size_text": "58.1 MB"
            }
        ]
    },
    "older": [
        {
            "version": "1.3.0",
            "release_date": "2020-11-15",
            "article_link": "/blog/1.3.0",
            "files": []
        }
    ]
}"#;

#[test]
fn test_build_writes_fragment() {
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    let out_path = dir.path().join("downloads.html");
    fs::write(&manifest_path, MANIFEST).unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args([
            "build",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
            "--base-url",
            "https://cdn.example.com/releases",
        ])
        .assert()
        .success();

    let page = fs::read_to_string(&out_path).unwrap();
    assert!(page.contains("ElectrumSV 1.4.0 (2021-05-01)"));
    assert!(page.contains("<h2>Latest Version</h2>"));
    assert!(page.contains("<h2>Older releases</h2>"));
    assert!(!page.contains("Experimental releases"));
    // External changelog link opens in an isolated new tab
    assert!(page.contains("target=\"_blank\""));
    assert!(page.contains("rel=\"noopener\""));
    // Download links have the exact {base}/{version}/{file} shape
    assert!(page.contains("https://cdn.example.com/releases/1.4.0/ElectrumSV-1.4.0.exe"));
    assert!(page.contains("https://cdn.example.com/releases/1.4.0/ElectrumSV-1.4.0.dmg"));
    // The 1.3.0 release ships no files
    assert!(page.contains("None at this time"));
    assert!(page.contains("Requires macOS 10.13 or later."));
}

#[test]
fn test_build_splices_into_shell() {
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    let shell_path = dir.path().join("shell.html");
    let out_path = dir.path().join("downloads.html");
    fs::write(&manifest_path, MANIFEST).unwrap();
    fs::write(
        &shell_path,
        "<html><body><nav>site</nav>\n<!-- relpage:releases -->\n<footer></footer></body></html>",
    )
    .unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args([
            "build",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
            "--shell",
            shell_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let page = fs::read_to_string(&out_path).unwrap();
    assert!(page.contains("<nav>site</nav>"));
    assert!(page.contains("<footer></footer>"));
    assert!(page.contains("ElectrumSV 1.4.0 (2021-05-01)"));
    assert!(!page.contains("relpage:releases"));
}

#[test]
fn test_build_fails_without_shell_marker() {
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    let shell_path = dir.path().join("shell.html");
    fs::write(&manifest_path, MANIFEST).unwrap();
    fs::write(&shell_path, "<html><body>no marker</body></html>").unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args([
            "build",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--out",
            dir.path().join("downloads.html").to_str().unwrap(),
            "--shell",
            shell_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("marker"));
}

#[test]
fn test_build_fetches_manifest_over_http() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/releases.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MANIFEST)
        .create();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("downloads.html");

    Command::cargo_bin("relpage")
        .unwrap()
        .args([
            "build",
            "--manifest",
            &format!("{}/releases.json", url),
            "--out",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    mock.assert();
    let page = fs::read_to_string(&out_path).unwrap();
    assert!(page.contains("ElectrumSV 1.4.0 (2021-05-01)"));
}

#[test]
fn test_check_reports_catalog_shape() {
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    fs::write(&manifest_path, MANIFEST).unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args(["check", "--manifest", manifest_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Manifest OK: latest 1.4.0 (2021-05-01), 1 older, 0 experimental, 2 files",
        ));
}

#[test]
fn test_check_rejects_missing_latest() {
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    fs::write(&manifest_path, r#"{"older": []}"#).unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args(["check", "--manifest", manifest_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no latest release"));
}

#[test]
fn test_check_rejects_ambiguous_article_link() {
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    fs::write(
        &manifest_path,
        r#"{
            "latest": {
                "version": "1.4.0",
                "release_date": "2021-05-01",
                "article_link": "blog/1.4.0"
            }
        }"#,
    )
    .unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args(["check", "--manifest", manifest_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized article link"));
}

#[test]
fn test_verify_reports_broken_links() {
    let mut server = Server::new();
    let base = server.url();

    let exe_mock = server
        .mock("HEAD", "/1.4.0/ElectrumSV-1.4.0.exe")
        .with_status(200)
        .create();
    let dmg_mock = server
        .mock("HEAD", "/1.4.0/ElectrumSV-1.4.0.dmg")
        .with_status(404)
        .create();
    // External changelog article is also probed
    let article_manifest = MANIFEST.replace(
        "https://medium.com/@example/electrumsv-1-4-0",
        &format!("{}/blog/electrumsv-1-4-0", base),
    );
    let article_mock = server
        .mock("HEAD", "/blog/electrumsv-1-4-0")
        .with_status(200)
        .create();

    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    fs::write(&manifest_path, article_manifest).unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args([
            "verify",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--base-url",
            &base,
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("BROKEN"))
        .stdout(predicate::str::contains("ElectrumSV-1.4.0.dmg"))
        .stderr(predicate::str::contains("1 of 3 links are broken"));

    exe_mock.assert();
    dmg_mock.assert();
    article_mock.assert();
}

#[test]
fn test_verify_all_links_ok() {
    let mut server = Server::new();
    let base = server.url();

    let exe_mock = server
        .mock("HEAD", "/1.4.0/ElectrumSV-1.4.0.exe")
        .with_status(200)
        .create();
    let dmg_mock = server
        .mock("HEAD", "/1.4.0/ElectrumSV-1.4.0.dmg")
        .with_status(200)
        .create();
    let article_manifest = MANIFEST.replace(
        "https://medium.com/@example/electrumsv-1-4-0",
        &format!("{}/blog/electrumsv-1-4-0", base),
    );
    let article_mock = server
        .mock("HEAD", "/blog/electrumsv-1-4-0")
        .with_status(200)
        .create();

    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    fs::write(&manifest_path, article_manifest).unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args([
            "verify",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--base-url",
            &base,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("All 3 links OK"));

    exe_mock.assert();
    dmg_mock.assert();
    article_mock.assert();
}

#[test]
fn test_product_override_changes_header() {
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("releases.json");
    let out_path = dir.path().join("downloads.html");
    fs::write(&manifest_path, MANIFEST).unwrap();

    Command::cargo_bin("relpage")
        .unwrap()
        .args([
            "build",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
            "--product",
            "OtherWallet",
        ])
        .assert()
        .success();

    let page = fs::read_to_string(&out_path).unwrap();
    assert!(page.contains("OtherWallet 1.4.0 (2021-05-01)"));
}
