//! Output sinks for compiled records

use async_trait::async_trait;
use futures::future::try_join_all;
use sheet2lua_core::prelude::*;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Destination for generated records
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Sink name for logs
    fn name(&self) -> &'static str;

    /// Whether records may be written concurrently
    fn concurrent(&self) -> bool {
        true
    }

    /// Write one record and return a description of where it went
    ///
    /// # Errors
    /// Returns an error if the record cannot be written
    async fn write_record(&self, record: &OutputRecord) -> Result<String>;
}

/// Writes `<dir>/<name>.<extension>` per record
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    extension: String,
}

impl DirectorySink {
    /// Create a sink writing into `dir`
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Create a sink from the output configuration
    #[must_use]
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.dir.clone(), config.extension.clone())
    }

    /// Target directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a record is written to
    #[must_use]
    pub fn destination(&self, record: &OutputRecord) -> PathBuf {
        self.dir.join(record.file_name(&self.extension))
    }
}

#[async_trait]
impl OutputSink for DirectorySink {
    fn name(&self) -> &'static str {
        "directory"
    }

    async fn write_record(&self, record: &OutputRecord) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.destination(record);
        tokio::fs::write(&path, record.body.as_bytes()).await?;
        debug!("Wrote {}", path.display());
        Ok(path.display().to_string())
    }
}

/// Prints records to standard output, for dry runs
#[derive(Debug, Clone)]
pub struct StdoutSink {
    extension: String,
}

impl StdoutSink {
    /// Create a stdout sink labelling records with `extension`
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

#[async_trait]
impl OutputSink for StdoutSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn concurrent(&self) -> bool {
        false
    }

    async fn write_record(&self, record: &OutputRecord) -> Result<String> {
        let file_name = record.file_name(&self.extension);
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("-- >>> {file_name}\n{}\n", record.body).as_bytes())
            .await?;
        stdout.flush().await?;
        Ok(file_name)
    }
}

/// Write every record, calling `on_written` after each one
///
/// Records go out concurrently when the sink allows it; the first failure
/// aborts the write phase.
///
/// # Errors
/// Returns the first sink error
pub async fn write_records<'a, I, F>(
    sink: &dyn OutputSink,
    records: I,
    on_written: F,
) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a OutputRecord>,
    F: Fn(&OutputRecord, &str) + Sync,
{
    let on_written = &on_written;
    let write_one = |record: &'a OutputRecord| async move {
        let destination = sink.write_record(record).await?;
        on_written(record, &destination);
        Ok::<_, Sheet2LuaError>(destination)
    };

    if sink.concurrent() {
        try_join_all(records.into_iter().map(write_one)).await
    } else {
        let mut destinations = Vec::new();
        for record in records {
            destinations.push(write_one(record).await?);
        }
        Ok(destinations)
    }
}
