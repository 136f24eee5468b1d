use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and a test database
fn mt_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mt").expect("Failed to find mt binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Extract the ID from a "... with ID: <id>" line of command output.
fn created_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    text.lines()
        .find_map(|line| line.split("with ID: ").nth(1))
        .expect("output contains an ID")
        .trim()
        .to_string()
}

fn add_machine(db_path: &Path, name: &str) -> String {
    let output = mt_cmd(db_path)
        .args(["machine", "add", name, "--location", "Line 1", "--manufacturer", "Acme"])
        .output()
        .expect("Failed to run mt");
    assert!(output.status.success());
    created_id(&output.stdout)
}

fn create_order(db_path: &Path, machine_id: &str, description: &str) -> String {
    let output = mt_cmd(db_path)
        .args([
            "order",
            "create",
            "--machine",
            machine_id,
            "--description",
            description,
            "--priority",
            "high",
            "--technician",
            "Dana",
            "--start-date",
            "2024-02-24",
            "--start-time",
            "07:45",
            "--expected-date",
            "2024-02-26",
            "--expected-time",
            "16:00",
            "--created-by",
            "Sam",
        ])
        .output()
        .expect("Failed to run mt");
    assert!(output.status.success());
    created_id(&output.stdout)
}

#[test]
fn test_cli_default_shows_dashboard() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mt_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Dashboard"))
        .stdout(predicate::str::contains("- **Total Machines**: 0"))
        .stdout(predicate::str::contains("| Month | Created | Completed |"));
}

#[test]
fn test_cli_add_machine_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mt_cmd(&db_path)
        .args([
            "machine",
            "add",
            "Conveyor Belt A1",
            "--location",
            "Line 1",
            "--manufacturer",
            "Acme",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Machine added successfully"))
        .stdout(predicate::str::contains("Added machine with ID:"))
        .stdout(predicate::str::contains("## Conveyor Belt A1"));
}

#[test]
fn test_cli_add_machine_requires_location() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mt_cmd(&db_path)
        .args(["machine", "add", "Press", "--location", "", "--manufacturer", "Acme"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Failed to add machine"))
        .stderr(predicate::str::contains("location"));
}

#[test]
fn test_cli_list_machines_with_search() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    add_machine(&db_path, "Conveyor Belt A1");
    add_machine(&db_path, "CNC Mill");

    mt_cmd(&db_path)
        .args(["machine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conveyor Belt A1"))
        .stdout(predicate::str::contains("CNC Mill"));

    mt_cmd(&db_path)
        .args(["machine", "list", "--search", "cnc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CNC Mill"))
        .stdout(predicate::str::contains("Conveyor").not());

    mt_cmd(&db_path)
        .args(["machine", "ls", "-s", "robot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No machines found."));
}

#[test]
fn test_cli_order_lifecycle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let machine_id = add_machine(&db_path, "Hydraulic Press");
    let order_id = create_order(&db_path, &machine_id, "Pressure drops under load");

    mt_cmd(&db_path)
        .args(["order", "list", "--status", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Hydraulic Press [HIGH] (○ Pending)"));

    mt_cmd(&db_path)
        .args([
            "order",
            "close",
            &order_id,
            "--resolution",
            "Replaced relief valve",
            "--parts",
            "relief valve, o-ring",
            "--signature",
            "Dana",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Work order closed successfully"))
        .stdout(predicate::str::contains("Closed work order with ID:"))
        .stdout(predicate::str::contains("- Parts Replaced: relief valve, o-ring"));

    mt_cmd(&db_path)
        .args(["order", "show", &order_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("(✓ Completed)"))
        .stdout(predicate::str::contains("- Signed By: Dana"));

    mt_cmd(&db_path)
        .args(["order", "list", "--status", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No work orders found."));

    // Closing twice is refused
    mt_cmd(&db_path)
        .args([
            "order",
            "close",
            &order_id,
            "--resolution",
            "Again",
            "--signature",
            "Dana",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Failed to close work order"));

    mt_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Completed Work Orders**: 1"));
}

#[test]
fn test_cli_create_order_with_bad_time() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let machine_id = add_machine(&db_path, "Lathe");

    mt_cmd(&db_path)
        .args([
            "order",
            "create",
            "--machine",
            &machine_id,
            "--description",
            "Chatter",
            "--technician",
            "Dana",
            "--start-date",
            "2024-02-24",
            "--start-time",
            "25:99",
            "--expected-date",
            "2024-02-26",
            "--expected-time",
            "16:00",
            "--created-by",
            "Sam",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Failed to create work order"))
        .stderr(predicate::str::contains("problem_start"));
}

#[test]
fn test_cli_delete_machine_with_orders_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let machine_id = add_machine(&db_path, "Lathe");
    let order_id = create_order(&db_path, &machine_id, "Chatter");

    mt_cmd(&db_path)
        .args(["machine", "delete", &machine_id])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Failed to delete machine"));

    mt_cmd(&db_path)
        .args(["order", "delete", &order_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted work order"));

    mt_cmd(&db_path)
        .args(["machine", "rm", &machine_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted machine 'Lathe'"));
}

#[test]
fn test_cli_show_missing_order() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mt_cmd(&db_path)
        .args(["order", "show", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Work order 'does-not-exist' not found"));
}

#[test]
fn test_cli_notifications_empty() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mt_cmd(&db_path)
        .arg("notifications")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notifications."));
}

#[test]
fn test_cli_export_writes_report() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    add_machine(&db_path, "Lathe");

    mt_cmd(&db_path)
        .args(["export", "--output-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Data exported successfully"))
        .stdout(predicate::str::contains("maintenance_report_"));

    let written = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".xlsx"))
        .count();
    assert_eq!(written, 1);
}

#[test]
fn test_cli_settings_require_confirm() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    add_machine(&db_path, "Lathe");

    mt_cmd(&db_path)
        .args(["settings", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    mt_cmd(&db_path)
        .args(["settings", "clear", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: All data has been cleared successfully",
        ));

    add_machine(&db_path, "Press");
    mt_cmd(&db_path)
        .args(["settings", "reset", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: System has been reset successfully"));

    mt_cmd(&db_path)
        .args(["machine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No machines found."));
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("mt")
        .expect("Failed to find mt binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("machine"))
        .stdout(predicate::str::contains("order"))
        .stdout(predicate::str::contains("export"));
}
