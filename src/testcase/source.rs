use std::{collections::HashMap, io::ErrorKind, path::PathBuf};

use anyhow::anyhow;

/// Provides the raw content of the test case inputs.
pub trait InputSource {
    /// Reads the input registered under `name`.
    /// # Arguments
    /// * `name` - The name of the input, e.g. a file name.
    /// # Returns
    /// * `Ok(None)` - If the input does not exist.
    fn read(&self, name: &str) -> Result<Option<String>, anyhow::Error>;
}

/// Reads inputs as files relative to a root directory.
pub struct FileSystemInputSource {
    root: PathBuf,
}

impl FileSystemInputSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl InputSource for FileSystemInputSource {
    fn read(&self, name: &str) -> Result<Option<String>, anyhow::Error> {
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow!("unable to read {}: {e}", path.display())),
        }
    }
}

pub struct InMemoryInputSource {
    inputs: HashMap<String, String>,
}

impl InMemoryInputSource {
    pub fn new() -> Self {
        Self {
            inputs: HashMap::new(),
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), content.into());
        self
    }
}

impl Default for InMemoryInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for InMemoryInputSource {
    fn read(&self, name: &str) -> Result<Option<String>, anyhow::Error> {
        Ok(self.inputs.get(name).cloned())
    }
}
