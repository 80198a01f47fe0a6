use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// The inventory data file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: String,
}

impl LocalStorage {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for LocalStorage {
    fn open_reader(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_writer(&self) -> Result<Box<dyn Write>> {
        let full_path = Path::new(&self.path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(full_path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn location(&self) -> &str {
        &self.path
    }
}
