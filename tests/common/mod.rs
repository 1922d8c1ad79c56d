use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

#[allow(dead_code)]
pub const INPUT1_SECRET: &str = "3";
pub const INPUT2_SECRET: &str = "4973359628788747334779083863096";

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testcases")
}

/// Creates an empty directory, unique to the test and the process, for test case files.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> Result<PathBuf, anyhow::Error> {
    let dir = std::env::temp_dir().join(format!(
        "secret_recovery_{name}_{}",
        std::process::id()
    ));
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Runs the recovery binary against `input_dir`, with `args` as input files.
#[allow(dead_code)]
pub fn run_recovery(input_dir: &Path, args: &[&str]) -> Result<Output, anyhow::Error> {
    let output = Command::new(env!("CARGO_BIN_EXE_secret_recovery"))
        .env("INPUT_DIR", input_dir)
        .env("LOG_LEVEL", "WARN")
        .env_remove("INPUT_FILES")
        .env_remove("RUST_LOG")
        .args(args)
        .output()?;
    Ok(output)
}

/// Runs the test case generator with `args`.
#[allow(dead_code)]
pub fn run_generator(args: &[&str]) -> Result<Output, anyhow::Error> {
    let output = Command::new(env!("CARGO_BIN_EXE_new_testcase"))
        .args(args)
        .output()?;
    Ok(output)
}

#[allow(dead_code)]
pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect()
}
