//! Persistent vector store backed by a JSON snapshot on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::{Chunk, Document, ScoredChunk};
use crate::error::{QaError, Result};
use crate::vectorstore::{StoreState, StoredChunk, VectorStore, rank_chunks};

const BACKEND: &str = "Disk";

/// Current snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of the full store state.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    documents: Vec<Document>,
    chunks: Vec<StoredChunk>,
}

/// A [`VectorStore`] that survives process restarts.
///
/// The full state lives in memory; every mutation serializes it to a JSON
/// snapshot written to a sibling file named by appending `.tmp` to the
/// snapshot path, then renamed over the target, so a crash mid-write
/// leaves the previous snapshot intact. A
/// mutation does not return, and is not visible to readers, until its
/// snapshot is on disk, which makes `add` all-or-nothing per document
/// across restarts.
///
/// # Example
///
/// ```rust,ignore
/// use pdf_qa::DiskVectorStore;
///
/// let store = DiskVectorStore::open("./qa_store.json").await?;
/// ```
pub struct DiskVectorStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl DiskVectorStore {
    /// Open a store at the given snapshot path, loading existing state.
    ///
    /// A missing snapshot file starts an empty store. Parent directories
    /// are created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::VectorStoreError`] if the snapshot exists but
    /// cannot be read or parsed, or carries an unsupported format version.
    /// A version mismatch is refused rather than silently discarded.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    store_error(format!("failed to create '{}': {e}", parent.display()))
                })?;
            }
        }

        let state = match tokio::fs::read_to_string(&path).await {
            Ok(data) => {
                let snapshot: Snapshot = serde_json::from_str(&data).map_err(|e| {
                    store_error(format!("failed to parse snapshot '{}': {e}", path.display()))
                })?;
                if snapshot.version != SNAPSHOT_VERSION {
                    return Err(store_error(format!(
                        "unsupported snapshot version {} in '{}'",
                        snapshot.version,
                        path.display()
                    )));
                }

                let state = StoreState {
                    documents: snapshot
                        .documents
                        .into_iter()
                        .map(|document| (document.id.clone(), document))
                        .collect(),
                    chunks: snapshot.chunks,
                };
                info!(
                    path = %path.display(),
                    documents = state.documents.len(),
                    chunks = state.chunks.len(),
                    "loaded vector store snapshot"
                );
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot found, starting empty");
                StoreState::default()
            }
            Err(e) => {
                return Err(store_error(format!(
                    "failed to read snapshot '{}': {e}",
                    path.display()
                )));
            }
        };

        Ok(Self { path, state: RwLock::new(state) })
    }

    /// Serialize `state` and atomically replace the snapshot file.
    async fn persist(&self, state: &StoreState) -> Result<()> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            documents: state.documents.values().cloned().collect(),
            chunks: state.chunks.clone(),
        };
        let data = serde_json::to_vec(&snapshot)
            .map_err(|e| store_error(format!("failed to serialize snapshot: {e}")))?;

        // Append to the full file name ("store.json" -> "store.json.tmp")
        // so snapshots differing only in extension never share a temp file.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .map_err(|e| store_error(format!("failed to create '{}': {e}", tmp.display())))?;
        file.write_all(&data)
            .await
            .map_err(|e| store_error(format!("failed to write '{}': {e}", tmp.display())))?;
        file.sync_all()
            .await
            .map_err(|e| store_error(format!("failed to sync '{}': {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            store_error(format!("failed to replace '{}': {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), chunks = state.chunks.len(), "persisted vector store snapshot");
        Ok(())
    }
}

fn store_error(message: String) -> QaError {
    QaError::VectorStoreError { backend: BACKEND.to_string(), message }
}

#[async_trait]
impl VectorStore for DiskVectorStore {
    async fn add(
        &self,
        document: Document,
        chunks: Vec<Chunk>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<()> {
        let mut state = self.state.write().await;

        // Mutate a scratch copy and commit only after the snapshot is on
        // disk, so a failed write leaves both memory and disk untouched.
        let mut next = state.clone();
        next.insert_document(BACKEND, document, chunks, embeddings)?;
        self.persist(&next).await?;
        *state = next;
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let state = self.state.read().await;
        Ok(rank_chunks(&state.chunks, embedding, k))
    }

    async fn delete(&self, document_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.documents.contains_key(document_id) {
            return Ok(());
        }

        let mut next = state.clone();
        next.remove_document(document_id);
        self.persist(&next).await?;
        *state = next;
        Ok(())
    }

    async fn contains(&self, document_id: &str) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.documents.contains_key(document_id))
    }
}
