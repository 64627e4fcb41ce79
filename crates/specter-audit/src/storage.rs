//! Audit storage backends.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::AuditError;
use crate::event::AuditEvent;
use crate::logger::AuditFilter;

/// Trait for audit storage backends.
#[async_trait]
pub trait AuditStorage: Send + Sync {
    /// Append one audit event.
    async fn store(&self, event: &AuditEvent) -> Result<(), AuditError>;

    /// Query stored events with filters. Backends without history
    /// return an empty list.
    async fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditEvent>, AuditError>;
}

/// No-op storage for disabled logging.
pub struct NullStorage;

#[async_trait]
impl AuditStorage for NullStorage {
    async fn store(&self, _event: &AuditEvent) -> Result<(), AuditError> {
        Ok(())
    }

    async fn query(&self, _filter: &AuditFilter) -> Result<Vec<AuditEvent>, AuditError> {
        Ok(vec![])
    }
}

/// Console storage: human-readable lines on stdout.
pub struct ConsoleStorage;

#[async_trait]
impl AuditStorage for ConsoleStorage {
    async fn store(&self, event: &AuditEvent) -> Result<(), AuditError> {
        println!("{}", event.to_log_line());
        Ok(())
    }

    async fn query(&self, _filter: &AuditFilter) -> Result<Vec<AuditEvent>, AuditError> {
        Ok(vec![])
    }
}

/// File storage: append-only JSON Lines, one serialized event per line.
///
/// Each append is a single write of one line, so concurrent writers can
/// interleave at line granularity but not corrupt a record.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a file storage, creating the parent directory if needed.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditStorage for FileStorage {
    async fn store(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let json = serde_json::to_string(event)?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }

    async fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditEvent>, AuditError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let file = std::fs::File::open(&self.path)?;
        let reader = std::io::BufReader::new(file);

        let mut results = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event: AuditEvent = serde_json::from_str(&line)
                .map_err(|e| AuditError::Storage(format!("corrupt audit record: {}", e)))?;
            if filter.accepts(&event) {
                results.push(event);
            }
        }

        // Newest first, bounded by the filter's limit.
        results.reverse();
        if let Some(limit) = filter.limit {
            results.truncate(limit);
        }

        Ok(results)
    }
}

/// Dual output: JSONL file plus human-readable console lines.
pub struct DualStorage {
    file: FileStorage,
    console: ConsoleStorage,
}

impl DualStorage {
    /// Create a dual storage writing to the given file path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        Ok(Self {
            file: FileStorage::new(path)?,
            console: ConsoleStorage,
        })
    }
}

#[async_trait]
impl AuditStorage for DualStorage {
    async fn store(&self, event: &AuditEvent) -> Result<(), AuditError> {
        self.file.store(event).await?;
        self.console.store(event).await
    }

    async fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditEvent>, AuditError> {
        self.file.query(filter).await
    }
}
