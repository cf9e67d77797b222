use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use sdnrag_core::domain::EvidenceUnit;
use sdnrag_core::error::AppError;
use serde::{Deserialize, Serialize};

use crate::embeddings::Embedder;

mod similarity;

/// Default retrieval fan-out per query.
pub const DEFAULT_TOP_K: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStatus {
    pub ready: bool,
    pub model: Option<String>,
    pub dims: Option<u32>,
    pub record_count: u32,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexBuildInput {
    pub model: String,
    pub updated_at: String,
}

/// One persisted `(vector, content, metadata)` triple. Records are stored in
/// insertion order; that order is the retrieval tie-breaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub unit_id: String,
    pub vector: Vec<f32>,
    pub content: String,
    pub metadata: BTreeMap<String, String>,
}

/// One ranked retrieval hit, most relevant first in the returned sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedUnit {
    pub content: String,
    pub metadata: BTreeMap<String, String>,
    pub score: f32,
}

/// A named, durable similarity-searchable collection of evidence units.
///
/// The collection lives at `<root>/<collection>/` as two JSON documents
/// written atomically (tmp file + rename). Rebuilding with the same name
/// replaces the prior contents wholesale; there is no incremental upsert.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    root: PathBuf,
    collection: String,
    top_k: u32,
}

impl VectorIndex {
    pub fn open(root: PathBuf, collection: String, top_k: u32) -> Self {
        Self {
            root,
            collection,
            top_k,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_dir(&self) -> PathBuf {
        self.root.join(&self.collection)
    }

    fn status_path(&self) -> PathBuf {
        self.collection_dir().join("status.json")
    }

    fn records_path(&self) -> PathBuf {
        self.collection_dir().join("records.json")
    }

    fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.collection_dir()).map_err(|e| {
            AppError::new("INDEX_BUILD_FAILED", "Failed to create collection directory")
                .with_details(format!("path={}; err={}", self.collection_dir().display(), e))
        })
    }

    pub fn status(&self) -> Result<IndexStatus, AppError> {
        let path = self.status_path();
        if !path.exists() {
            return Ok(IndexStatus {
                ready: false,
                model: None,
                dims: None,
                record_count: 0,
                updated_at: None,
            });
        }
        let bytes = fs::read(&path).map_err(|e| {
            AppError::new("INDEX_READ_FAILED", "Failed to read index status")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::new("INDEX_READ_FAILED", "Failed to decode index status")
                .with_details(format!("path={}; err={}", path.display(), e))
        })
    }

    fn write_status(&self, st: &IndexStatus) -> Result<(), AppError> {
        self.ensure_dirs()?;
        let path = self.status_path();
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(st).map_err(|e| {
            AppError::new("INDEX_BUILD_FAILED", "Failed to encode index status")
                .with_details(e.to_string())
        })?;
        fs::write(&tmp, json.as_bytes()).map_err(|e| {
            AppError::new("INDEX_BUILD_FAILED", "Failed to write index status")
                .with_details(format!("path={}; err={}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            AppError::new("INDEX_BUILD_FAILED", "Failed to finalize index status write")
                .with_details(format!("tmp={}; dest={}; err={}", tmp.display(), path.display(), e))
        })?;
        Ok(())
    }

    fn write_records(&self, records: &[IndexedRecord]) -> Result<(), AppError> {
        self.ensure_dirs()?;
        let path = self.records_path();
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(records).map_err(|e| {
            AppError::new("INDEX_BUILD_FAILED", "Failed to encode index records")
                .with_details(e.to_string())
        })?;
        fs::write(&tmp, json.as_bytes()).map_err(|e| {
            AppError::new("INDEX_BUILD_FAILED", "Failed to write index records")
                .with_details(format!("path={}; err={}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            AppError::new("INDEX_BUILD_FAILED", "Failed to finalize index records write")
                .with_details(format!("tmp={}; dest={}; err={}", tmp.display(), path.display(), e))
        })?;
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<IndexedRecord>, AppError> {
        let path = self.records_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).map_err(|e| {
            AppError::new("INDEX_READ_FAILED", "Failed to read index records")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::new("INDEX_READ_FAILED", "Failed to decode index records")
                .with_details(format!("path={}; err={}", path.display(), e))
        })
    }

    /// Embed every unit and replace the collection with the result.
    ///
    /// All embeddings must agree on dimensionality; a mismatch aborts the
    /// build before anything is written. Records and status are only
    /// persisted after every embedding call has succeeded.
    pub fn build(
        &self,
        units: &[EvidenceUnit],
        embedder: &dyn Embedder,
        input: IndexBuildInput,
    ) -> Result<IndexStatus, AppError> {
        if units.is_empty() {
            return Err(AppError::new(
                "INDEX_EMPTY_CORPUS",
                "Refusing to build an index from zero evidence units",
            ));
        }

        let mut records: Vec<IndexedRecord> = Vec::with_capacity(units.len());
        let mut dims: Option<u32> = None;

        for (ordinal, unit) in units.iter().enumerate() {
            let vector = embedder.embed(&input.model, &unit.content).map_err(|e| {
                AppError::new("INDEX_BUILD_FAILED", "Failed to embed evidence unit")
                    .with_details(format!("ordinal={ordinal}; err={e}"))
                    .with_retryable(e.retryable)
            })?;

            let this_dims = vector.len() as u32;
            match dims {
                Some(d) if d != this_dims => {
                    return Err(AppError::new(
                        "INDEX_BUILD_FAILED",
                        "Embedding dimension mismatch across evidence units",
                    )
                    .with_details(format!("expected={d}; got={this_dims}; ordinal={ordinal}")));
                }
                Some(_) => {}
                None => dims = Some(this_dims),
            }

            records.push(IndexedRecord {
                unit_id: unit.unit_id(ordinal),
                vector,
                content: unit.content.clone(),
                metadata: unit.meta.as_map(),
            });
        }

        self.write_records(&records)?;
        let status = IndexStatus {
            ready: true,
            model: Some(input.model),
            dims,
            record_count: records.len() as u32,
            updated_at: Some(input.updated_at),
        };
        self.write_status(&status)?;
        Ok(status)
    }

    /// Return the `top_k` nearest stored units for `query`, nearest first.
    ///
    /// An absent or not-ready collection yields an empty result rather than
    /// an error; the synthesizer's fallback handles that case. The query is
    /// embedded with the model recorded at build time so both sides share
    /// one embedding space. Exact similarity ties keep insertion order.
    pub fn retrieve(
        &self,
        embedder: &dyn Embedder,
        query: &str,
    ) -> Result<Vec<RetrievedUnit>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::new("RETRIEVAL_FAILED", "Query must not be empty"));
        }

        let st = self.status()?;
        if !st.ready {
            return Ok(Vec::new());
        }
        let model = st
            .model
            .ok_or_else(|| AppError::new("INDEX_READ_FAILED", "Index status missing model"))?;
        let dims = st
            .dims
            .ok_or_else(|| AppError::new("INDEX_READ_FAILED", "Index status missing dims"))?;

        let records = self.read_records()?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let qv = embedder.embed(&model, query)?;
        if qv.len() as u32 != dims {
            return Err(AppError::new(
                "RETRIEVAL_FAILED",
                "Query embedding dims do not match index dims",
            )
            .with_details(format!("index_dims={dims}; query_dims={}", qv.len())));
        }
        let qnorm = similarity::l2_norm(&qv);
        if qnorm == 0.0 {
            return Err(AppError::new(
                "RETRIEVAL_FAILED",
                "Query embedding norm is zero",
            ));
        }

        let mut ranked: Vec<(usize, f32)> = Vec::new();
        for (pos, rec) in records.iter().enumerate() {
            if rec.vector.len() as u32 != dims {
                return Err(AppError::new(
                    "INDEX_READ_FAILED",
                    "Stored vector dims do not match index dims",
                )
                .with_details(format!(
                    "unit_id={}; expected={dims}; got={}",
                    rec.unit_id,
                    rec.vector.len()
                )));
            }
            let vnorm = similarity::l2_norm(&rec.vector);
            if vnorm == 0.0 {
                continue;
            }
            ranked.push((pos, similarity::cosine_similarity(&qv, &rec.vector, qnorm, vnorm)));
        }

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.truncate(self.top_k as usize);

        Ok(ranked
            .into_iter()
            .map(|(pos, score)| {
                let rec = &records[pos];
                RetrievedUnit {
                    content: rec.content.clone(),
                    metadata: rec.metadata.clone(),
                    score,
                }
            })
            .collect())
    }
}
