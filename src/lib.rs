use std::{
    collections::HashSet,
    env::{self, VarError},
    path::PathBuf,
    str::FromStr,
};
use tracing::Level;

pub mod recovery;
pub mod testcase;

const DEFAULT_INPUT_DIR: &str = "testcases";
const DEFAULT_INPUT_FILES: [&str; 2] = ["input1.json", "input2.json"];

// ############################################
// ################## CONFIG ##################
// ############################################

pub struct Config {
    pub input_dir: PathBuf,
    pub input_files: Vec<String>,
    pub log_level: Level,
}

impl Config {
    pub fn parse_environment() -> Result<Config, anyhow::Error> {
        let mut errors: Vec<String> = vec![];
        let input_dir = match parse_env_variable::<PathBuf>("INPUT_DIR") {
            Ok(v) => v.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
            Err(e) => {
                errors.push(e.to_string());
                PathBuf::from(DEFAULT_INPUT_DIR)
            }
        };
        // `LOG_LEVEL` has priority over `RUST_LOG`
        let log_level = match parse_env_variable::<Level>("LOG_LEVEL") {
            Ok(v) => v
                .or_else(|| parse_env_variable::<Level>("RUST_LOG").unwrap_or(None))
                .unwrap_or(Level::INFO),
            Err(e) => {
                errors.push(e.to_string());
                Level::INFO
            }
        };

        let input_files = match parse_env_variable::<String>("INPUT_FILES") {
            Ok(Some(raw)) => match parse_input_files(&raw) {
                Ok(v) => v,
                Err(e) => {
                    errors.push(e.to_string());
                    vec![]
                }
            },
            Ok(None) => DEFAULT_INPUT_FILES.map(String::from).to_vec(),
            Err(e) => {
                errors.push(e.to_string());
                vec![]
            }
        };

        if !errors.is_empty() {
            return Err(anyhow::anyhow!(errors.join(", ")));
        }

        Ok(Config {
            input_dir,
            input_files,
            log_level,
        })
    }

    /// Replaces the configured input files, e.g. by the ones given on the command line.
    pub fn with_input_files(mut self, input_files: Vec<String>) -> Result<Config, anyhow::Error> {
        self.input_files = validate_input_files(input_files, "[ARGS]")?;
        Ok(self)
    }
}

fn parse_input_files(raw: &str) -> Result<Vec<String>, anyhow::Error> {
    let input_files = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<String>>();
    validate_input_files(input_files, "[INPUT_FILES]")
}

fn validate_input_files(input_files: Vec<String>, origin: &str) -> Result<Vec<String>, anyhow::Error> {
    if input_files.is_empty() {
        return Err(anyhow::anyhow!("{origin}: must contain at least one file"));
    }
    let input_file_set = input_files.iter().collect::<HashSet<&String>>();
    if input_file_set.len() != input_files.len() {
        return Err(anyhow::anyhow!("{origin}: must contain unique files"));
    }
    Ok(input_files)
}

fn parse_env_variable<T>(key: &str) -> Result<Option<T>, anyhow::Error>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    fn map_err<E>(key: &str, e: E) -> anyhow::Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        anyhow::anyhow!("[{key}]: {e}")
    }

    let env_value = match env::var(key) {
        Ok(v) => {
            if v.is_empty() {
                Ok(None)
            } else {
                Ok(Some(v))
            }
        }
        Err(e) => {
            if e == VarError::NotPresent {
                Ok(None)
            } else {
                Err(map_err(key, e))
            }
        }
    }?;
    env_value
        .map(|v| v.parse::<T>().map_err(|e| map_err(key, e)))
        .transpose()
}
