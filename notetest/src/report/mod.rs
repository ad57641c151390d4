pub mod allure;

use crate::error::Error;
use allure::{Attachment, TestResult};
use fs::File;
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;
use uuid::Uuid;

pub const ENVIRONMENT_FILE: &str = "environment.properties";
pub const TEXT_PLAIN: &str = "text/plain";

/// Directory that collects the artifacts of a run. Files are only ever
/// created, never rewritten.
#[derive(Debug, Clone)]
pub struct ResultsStore {
    dir: PathBuf,
}

impl ResultsStore {
    pub fn open<P: Into<PathBuf>>(dir: P) -> Result<Self, Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_environment<K: AsRef<str>, V: AsRef<str>>(
        &self,
        properties: &[(K, V)],
    ) -> Result<PathBuf, Error> {
        let path = self.dir.join(ENVIRONMENT_FILE);
        let mut file = BufWriter::new(File::create(&path)?);

        for (key, value) in properties {
            writeln!(file, "{}={}", key.as_ref(), value.as_ref())?;
        }
        file.flush()?;

        Ok(path)
    }

    pub fn attach_text(&self, name: &str, content: &str) -> Result<Attachment, Error> {
        let source = format!("{}-attachment.txt", Uuid::new_v4());
        fs::write(self.dir.join(&source), content)?;
        debug!(name, source = %source, "attached");

        Ok(Attachment {
            name: String::from(name),
            source,
            content_type: String::from(TEXT_PLAIN),
        })
    }

    pub fn write_result(&self, result: &TestResult) -> Result<PathBuf, Error> {
        let path = self.dir.join(format!("{}-result.json", result.uuid));
        let mut file = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut file, result)?;
        file.flush()?;

        Ok(path)
    }
}
