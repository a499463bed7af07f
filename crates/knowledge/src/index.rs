//! SQLite-backed vector index for knowledge chunks.
//!
//! Vectors are stored as little-endian `f32` blobs and scored with cosine
//! similarity in process. The `sources` table keeps the SHA-256 of every
//! indexed document so a stale snapshot can be detected.

use crate::types::{Document, KnowledgeChunk, ScoredChunk};
use crate::vector_index::VectorIndex;
use chrono::Utc;
use netassist_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Vector index stored in a single SQLite file.
pub struct SqliteIndex {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl std::fmt::Debug for SqliteIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteIndex").field("path", &self.path).finish()
    }
}

impl SqliteIndex {
    /// Open or create the index database, creating tables as needed.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Knowledge(format!("Failed to create index directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Knowledge(format!("Failed to open SQLite index: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sources (
                path TEXT PRIMARY KEY,
                sha256 TEXT NOT NULL,
                size_bytes INTEGER NOT NULL,
                indexed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS chunks (
                id TEXT PRIMARY KEY,
                source TEXT NOT NULL,
                position INTEGER NOT NULL,
                start_byte INTEGER NOT NULL,
                end_byte INTEGER NOT NULL,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_chunks_source ON chunks(source);
            "#,
        )
        .map_err(|e| AppError::Knowledge(format!("Failed to create tables: {}", e)))?;

        tracing::debug!("Opened SQLite index at {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
            path: db_path.to_path_buf(),
        })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Knowledge("Index connection lock poisoned".to_string()))
    }
}

impl VectorIndex for SqliteIndex {
    fn record_source(&mut self, doc: &Document) -> AppResult<()> {
        insert_source(&*self.conn()?, doc)
    }

    fn source_hashes(&self) -> AppResult<BTreeMap<String, String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT path, sha256 FROM sources")
            .map_err(|e| AppError::Knowledge(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(|e| AppError::Knowledge(format!("Failed to query sources: {}", e)))?;

        let hashes = rows
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map_err(|e| AppError::Knowledge(format!("Failed to read sources: {}", e)))?;

        Ok(hashes)
    }

    fn upsert_chunk(&mut self, chunk: &KnowledgeChunk) -> AppResult<()> {
        insert_chunk(&*self.conn()?, chunk)
    }

    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<ScoredChunk>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, source, position, start_byte, end_byte, text, embedding
                 FROM chunks ORDER BY source, position",
            )
            .map_err(|e| AppError::Knowledge(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let chunk = KnowledgeChunk {
                    id: row.get(0)?,
                    source: row.get(1)?,
                    position: row.get::<_, i64>(2)? as u32,
                    start: row.get::<_, i64>(3)? as usize,
                    end: row.get::<_, i64>(4)? as usize,
                    text: row.get(5)?,
                    embedding: None,
                };
                Ok((chunk, row.get::<_, Vec<u8>>(6)?))
            })
            .map_err(|e| AppError::Knowledge(format!("Failed to query chunks: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            let (chunk, bytes) =
                row.map_err(|e| AppError::Knowledge(format!("Failed to read chunk: {}", e)))?;
            let score = cosine_similarity(query_embedding, &bytes_to_embedding(&bytes)?);
            results.push(ScoredChunk { chunk, score });
        }

        // Stable sort keeps document order among equal scores.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        tracing::debug!(
            "Retrieved {} chunks (requested top-{})",
            results.len(),
            top_k
        );

        Ok(results)
    }

    fn counts(&self) -> AppResult<(u32, u32)> {
        let conn = self.conn()?;
        let count = |table: &str| -> AppResult<u32> {
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|v| v as u32)
            .map_err(|e| AppError::Knowledge(format!("Failed to count {}: {}", table, e)))
        };

        Ok((count("sources")?, count("chunks")?))
    }

    fn clear(&mut self) -> AppResult<()> {
        self.conn()?
            .execute_batch(CLEAR_SQL)
            .map_err(|e| AppError::Knowledge(format!("Failed to clear index: {}", e)))?;

        tracing::info!("Cleared knowledge index at {:?}", self.path);
        Ok(())
    }

    fn replace_all(&mut self, docs: &[Document], chunks: &[KnowledgeChunk]) -> AppResult<()> {
        let tx_err =
            |e: rusqlite::Error| AppError::Knowledge(format!("Index transaction failed: {}", e));

        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(tx_err)?;
        tx.execute_batch(CLEAR_SQL).map_err(tx_err)?;
        for doc in docs {
            insert_source(&tx, doc)?;
        }
        for chunk in chunks {
            insert_chunk(&tx, chunk)?;
        }
        // Dropping `tx` on an early return rolls everything back.
        tx.commit().map_err(tx_err)?;

        tracing::info!(
            "Replaced knowledge index at {:?}: {} sources, {} chunks",
            self.path,
            docs.len(),
            chunks.len()
        );
        Ok(())
    }
}

const CLEAR_SQL: &str = "DELETE FROM chunks; DELETE FROM sources;";

fn insert_source(conn: &Connection, doc: &Document) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO sources (path, sha256, size_bytes, indexed_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            doc.source,
            doc.content_hash(),
            doc.content.len() as i64,
            Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| AppError::Knowledge(format!("Failed to insert source: {}", e)))?;

    Ok(())
}

fn insert_chunk(conn: &Connection, chunk: &KnowledgeChunk) -> AppResult<()> {
    let embedding = chunk
        .embedding
        .as_ref()
        .ok_or_else(|| AppError::Knowledge(format!("Chunk {} missing embedding", chunk.id)))?;

    conn.execute(
        "INSERT OR REPLACE INTO chunks (id, source, position, start_byte, end_byte, text, embedding)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            chunk.id,
            chunk.source,
            chunk.position as i64,
            chunk.start as i64,
            chunk.end as i64,
            chunk.text,
            embedding_to_bytes(embedding),
        ],
    )
    .map_err(|e| AppError::Knowledge(format!("Failed to insert chunk: {}", e)))?;

    Ok(())
}

/// Convert embedding vector to bytes for storage.
fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Convert bytes back to embedding vector.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Knowledge(
            "Invalid embedding bytes length".to_string(),
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Calculate cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
