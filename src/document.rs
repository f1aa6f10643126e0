//! Documents and the source they come from.
//!
//! The engine never owns documents; it reads snapshots from a
//! [`DocumentSource`]. `InMemoryDocuments` is the source used by the service
//! and the tests.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::debug;

/// One uploaded text. Only `content` (and `id` for the demo gender split) is
/// read by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub content: String,
    pub author: String,
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Document {
    pub fn new(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            author: String::new(),
            timestamp: 0,
        }
    }
}

/// Outcome of [`DocumentSource::upload_batch`]. Documents are stored one at a
/// time, so `ids` lists everything committed before `error` stopped the batch.
#[derive(Debug, Default)]
pub struct BatchUpload {
    pub ids: Vec<u64>,
    pub error: Option<anyhow::Error>,
}

impl BatchUpload {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Backend collaborator holding the documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn get_all_documents(&self) -> Result<Vec<Document>>;
    async fn upload_document(&self, content: String) -> Result<u64>;
    async fn delete_document(&self, id: u64) -> Result<bool>;
    fn name(&self) -> &'static str;

    /// Upload many documents in chunks, reporting `(done, total)` after each
    /// full chunk and yielding to the runtime in between. Stops at the first
    /// failure; ids stored up to that point are kept in the outcome.
    async fn upload_batch(
        &self,
        contents: Vec<String>,
        chunk_size: usize,
        progress: &(dyn Fn(usize, usize) + Send + Sync),
    ) -> BatchUpload {
        let total = contents.len();
        let mut out = BatchUpload {
            ids: Vec::with_capacity(total),
            error: None,
        };
        for chunk in contents.chunks(chunk_size.max(1)) {
            for content in chunk {
                match self.upload_document(content.clone()).await {
                    Ok(id) => out.ids.push(id),
                    Err(e) => {
                        out.error = Some(e);
                        return out;
                    }
                }
            }
            progress(out.ids.len(), total);
            tokio::task::yield_now().await;
        }
        out
    }
}

#[derive(Debug, Default)]
struct Inner {
    docs: Vec<Document>,
    next_id: u64,
}

/// Thread-safe in-memory document list; ids are assigned sequentially from 0.
#[derive(Debug)]
pub struct InMemoryDocuments {
    inner: RwLock<Inner>,
    author: String,
}

impl Default for InMemoryDocuments {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::with_author("anonymous")
    }

    pub fn with_author(author: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            author: author.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("document store lock poisoned")
}

fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

#[async_trait]
impl DocumentSource for InMemoryDocuments {
    async fn get_all_documents(&self) -> Result<Vec<Document>> {
        let g = self.inner.read().map_err(poisoned)?;
        Ok(g.docs.clone())
    }

    async fn upload_document(&self, content: String) -> Result<u64> {
        if content.trim().is_empty() {
            bail!("document content is empty");
        }
        let mut g = self.inner.write().map_err(poisoned)?;
        let id = g.next_id;
        g.next_id += 1;
        g.docs.push(Document {
            id,
            content,
            author: self.author.clone(),
            timestamp: now_nanos(),
        });
        debug!(target: "documents", id, "document stored");
        Ok(id)
    }

    async fn delete_document(&self, id: u64) -> Result<bool> {
        let mut g = self.inner.write().map_err(poisoned)?;
        let before = g.docs.len();
        g.docs.retain(|d| d.id != id);
        Ok(g.docs.len() != before)
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
