use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn drydock() -> assert_cmd::Command {
    cargo_bin_cmd!("drydock")
}

fn write_config(dir: &std::path::Path, body: &str) {
    std::fs::write(dir.join("drydock.toml"), body).unwrap();
}

fn add_service(dir: &std::path::Path, name: &str) {
    let service = dir.join(name);
    std::fs::create_dir_all(&service).unwrap();
    std::fs::write(service.join("Dockerfile"), "FROM scratch\n").unwrap();
    std::fs::write(service.join("app.txt"), "v1").unwrap();
}

// ── Help / Version ──

#[test]
fn shows_help() {
    drydock()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build changed services"));
}

#[test]
fn shows_version() {
    drydock()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("drydock"));
}

// ── Release: validation ──

#[test]
fn release_fails_without_registry() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "[services]\ndirs = [\"api\"]\ndeployments = [\"api\"]\n",
    );
    add_service(tmp.path(), "api");

    drydock()
        .current_dir(tmp.path())
        .arg("release")
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry"));
}

#[test]
fn release_fails_on_misaligned_service_lists() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "[project]\nregistry = \"registry.test/acme\"\n\n[services]\ndirs = [\"api\", \"worker\"]\ndeployments = [\"api\"]\n",
    );

    drydock()
        .current_dir(tmp.path())
        .arg("release")
        .assert()
        .failure()
        .stderr(predicate::str::contains("misaligned"));
}

#[test]
fn release_fails_on_missing_service_directory() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "[project]\nregistry = \"registry.test/acme\"\n\n[services]\ndirs = [\"ghost\"]\ndeployments = [\"ghost\"]\n",
    );

    drydock()
        .current_dir(tmp.path())
        .arg("release")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn release_fails_on_missing_dockerfile() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "[project]\nregistry = \"registry.test/acme\"\n\n[services]\ndirs = [\"api\"]\ndeployments = [\"api\"]\n",
    );
    std::fs::create_dir_all(tmp.path().join("api")).unwrap();
    std::fs::write(tmp.path().join("api/app.txt"), "v1").unwrap();

    drydock()
        .current_dir(tmp.path())
        .arg("release")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dockerfile"));
}

// ── Status ──

#[test]
fn status_reports_fresh_services_as_changed() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "[services]\ndirs = [\"api\", \"worker\"]\ndeployments = [\"api-server\", \"worker-pool\"]\n",
    );
    add_service(tmp.path(), "api");
    add_service(tmp.path(), "worker");

    drydock()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("changed"))
        .stdout(predicate::str::contains("2 of 2 service(s)"));
}

#[test]
fn status_does_not_create_run_state() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "[services]\ndirs = [\"api\"]\ndeployments = [\"api\"]\n",
    );
    add_service(tmp.path(), "api");

    drydock()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success();

    assert!(!tmp.path().join(".drydock").exists());
}

#[test]
fn status_without_services_points_at_the_config() {
    let tmp = TempDir::new().unwrap();

    drydock()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No services configured"));
}
