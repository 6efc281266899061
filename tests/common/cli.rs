use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated working directory with its own home, so no user or project
/// config leaks into a test run.
pub struct TixWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TixWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("write workspace file");
        path
    }
}

pub struct TixRun {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl TixRun {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }

    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).expect("JSON line"))
            .collect()
    }
}

fn command(workspace: &TixWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("tix").expect("tix binary");
    cmd.current_dir(&workspace.root)
        .env("HOME", &workspace.root)
        .env("XDG_CONFIG_HOME", workspace.root.join(".config"))
        .env_remove("RUST_LOG");
    for key in [
        "TIX_CONFIG",
        "TIX_SEED",
        "TIX_ROWS",
        "TIX_START_NUMBER",
        "TIX_WINDOW_START",
        "TIX_WINDOW_DAYS",
        "TIX_EXPORT_PATH",
        "TIX_LOG_FORMAT",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

pub fn run_tix<I, S>(workspace: &TixWorkspace, args: I, label: &str) -> TixRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_tix_with_stdin(workspace, args, "", label)
}

pub fn run_tix_with_stdin<I, S>(workspace: &TixWorkspace, args: I, stdin: &str, label: &str) -> TixRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = command(workspace)
        .args(args)
        .write_stdin(stdin.to_string())
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run tix: {e}"));
    TixRun {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

pub fn tix_cmd(workspace: &TixWorkspace) -> Command {
    command(workspace)
}
