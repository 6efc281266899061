mod common;
use common::cli::{TixWorkspace, run_tix, run_tix_with_stdin};

const HEADER: &str = "ID,Issue,Status,Priority,Date Submitted,Assigned To,Response Time (hours),Resolution Time (hours)";

#[test]
fn test_export_default_file() {
    let workspace = TixWorkspace::new();
    let run = run_tix(&workspace, ["--rows", "12", "export"], "export");
    assert!(run.status.success(), "export failed: {}", run.stderr);
    assert!(run.stdout.contains("Exported 12 ticket(s)"));

    let text = std::fs::read_to_string(workspace.path("support_tickets.csv")).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER));
    assert_eq!(lines.count(), 12);
}

#[test]
fn test_export_to_stdout() {
    let workspace = TixWorkspace::new();
    let run = run_tix(&workspace, ["--rows", "3", "export", "-o", "-"], "export_stdout");
    assert!(run.status.success(), "export failed: {}", run.stderr);
    assert!(run.stdout.starts_with(HEADER));
    assert!(!workspace.path("support_tickets.csv").exists());
}

#[test]
fn test_export_round_trips_through_from_csv() {
    let workspace = TixWorkspace::new();
    let export = run_tix(
        &workspace,
        ["--seed", "11", "export", "-o", "table.csv"],
        "export",
    );
    assert!(export.status.success(), "export failed: {}", export.stderr);

    let seeded = run_tix(&workspace, ["--json", "--seed", "11", "list"], "seeded");
    let imported = run_tix(
        &workspace,
        ["--json", "--from-csv", "table.csv", "list"],
        "imported",
    );
    assert!(imported.status.success(), "import failed: {}", imported.stderr);
    assert_eq!(seeded.json()["tickets"], imported.json()["tickets"]);
}

#[test]
fn test_from_csv_rejects_wrong_header() {
    let workspace = TixWorkspace::new();
    workspace.write("bad.csv", "id,issue\nTICKET-1,x\n");
    let run = run_tix(&workspace, ["--from-csv", "bad.csv", "list"], "bad_csv");
    assert!(!run.status.success());
    assert!(run.stderr.contains("CSV parse error"), "{}", run.stderr);
}

#[test]
fn test_session_keeps_one_store() {
    let workspace = TixWorkspace::new();
    let script = r#"
# submit, close it, then look at closed tickets only
{"action": "add", "issue": "Badge reader offline", "priority": "High", "assigned_to": "Alex Brown"}
{"action": "edit", "edits": [{"id": "TICKET-1101", "status": "Closed", "priority": "Low"}]}
{"action": "filter", "statuses": ["Closed"], "search": "badge reader"}
"#;
    let run = run_tix_with_stdin(&workspace, ["--json", "session"], script, "session");
    assert!(run.status.success(), "session failed: {}", run.stderr);

    let frames = run.json_lines();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0]["step"], 1);
    assert_eq!(frames[0]["created"]["id"], "TICKET-1101");
    assert_eq!(frames[1]["edits"]["changed"][0], "TICKET-1101");
    assert_eq!(frames[2]["total"], 101);

    let view = frames[2]["view"].as_array().unwrap();
    assert!(view.iter().any(|t| t["id"] == "TICKET-1101" && t["priority"] == "Low"));
    assert!(view.iter().all(|t| t["status"] == "Closed"));
}

#[test]
fn test_session_reports_failed_lines() {
    let workspace = TixWorkspace::new();
    let script = "{\"action\": \"stats\"}\n{\"action\": \"nope\"}\n{\"action\": \"show\"}\n";
    let run = run_tix_with_stdin(&workspace, ["--json", "session"], script, "session_fail");
    assert!(!run.status.success());
    assert!(run.stderr.contains("1 of 3 session actions failed"), "{}", run.stderr);

    let lines = run.json_lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["step"], 2);
    assert!(lines[1]["error"].as_str().is_some());
}

#[test]
fn test_session_fail_fast_stops() {
    let workspace = TixWorkspace::new();
    let script = "{\"action\": \"nope\"}\n{\"action\": \"stats\"}\n";
    let run = run_tix_with_stdin(
        &workspace,
        ["--json", "session", "--fail-fast"],
        script,
        "session_fail_fast",
    );
    assert!(!run.status.success());
    assert_eq!(run.json_lines().len(), 1);
}

#[test]
fn test_session_script_file_and_config() {
    let workspace = TixWorkspace::new();
    workspace.write(".tix.yaml", "rows: 5\nexport_path: from_session.csv\n");
    let script = workspace.write("script.jsonl", "{\"action\": \"export\"}\n");
    let run = run_tix(
        &workspace,
        ["session", "--script", script.to_str().unwrap()],
        "session_script",
    );
    assert!(run.status.success(), "session failed: {}", run.stderr);
    assert!(run.stdout.contains("[1] export"));

    let text = std::fs::read_to_string(workspace.path("from_session.csv")).unwrap();
    assert_eq!(text.lines().count(), 6);
}

#[test]
fn test_add_after_largest_id_fails_cleanly() {
    let workspace = TixWorkspace::new();
    workspace.write(
        "max.csv",
        &format!("{HEADER}\nTICKET-18446744073709551615,Fan noise,Open,Low,2024-01-02,John Doe,3,24\n"),
    );
    let run = run_tix(
        &workspace,
        ["--from-csv", "max.csv", "add", "--issue", "y"],
        "add_after_max",
    );
    assert!(!run.status.success());
    assert!(run.stderr.contains("no id left"), "{}", run.stderr);
    assert!(!run.stderr.contains("panicked"), "{}", run.stderr);
}
