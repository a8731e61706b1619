//! SQLite-backed [`DocumentStore`] (§4.3): libraries, versions, chunks and
//! embeddings in one file, FTS5 for the sparse side of hybrid search, and
//! an in-process brute-force scan for the dense side (see
//! [`super::schema`]).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use mcb_domain::error::{Error, Result};
use mcb_domain::ports::{ChunkSplitter, DocumentStore, EmbeddingProvider, NewChunk, RemoveVersionOutcome, StoredScraperOptions};
use mcb_domain::value_objects::{
    rrf_score, DocumentId, LibraryId, LibrarySummary, PersistedScraperOptions, Section, VersionId,
    VersionRow, VersionStatus,
};
use mcb_domain::{constants, Document};
use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;

use super::schema::SCHEMA;

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn encode_vector(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * 4);
    for v in vector {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

fn decode_vector(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

fn status_from_str(s: &str) -> VersionStatus {
    match s {
        "queued" => VersionStatus::Queued,
        "running" => VersionStatus::Running,
        "completed" => VersionStatus::Completed,
        "failed" => VersionStatus::Failed,
        "cancelled" => VersionStatus::Cancelled,
        _ => VersionStatus::NotIndexed,
    }
}

/// Build the fixed embedding-input header: `<title>…</title><url>…</url><path>a / b / c</path>`
/// concatenated with chunk content (§4.3 op 2).
fn embedding_input(title: Option<&str>, url: &str, path: &[String], content: &str) -> String {
    let path_str = path.join(" / ");
    format!(
        "<title>{}</title><url>{url}</url><path>{path_str}</path>{content}",
        title.unwrap_or_default()
    )
}

/// A SQLite-backed, single-file implementation of the Document Store.
pub struct SqliteDocumentStore {
    conn: Connection,
    embedding: Arc<dyn EmbeddingProvider>,
    splitter: Arc<dyn ChunkSplitter>,
    store_dimensions: usize,
}

impl SqliteDocumentStore {
    /// Open (creating if absent) the store file at `path`, applying the
    /// schema and wiring in the embedding provider and splitter used by
    /// [`DocumentStore::add_document`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the database cannot be opened or
    /// migrated.
    pub async fn open(
        path: impl AsRef<Path>,
        embedding: Arc<dyn EmbeddingProvider>,
        splitter: Arc<dyn ChunkSplitter>,
    ) -> Result<Self> {
        let conn = Connection::open(path.as_ref().to_owned())
            .await
            .map_err(|e| Error::connection_with_source("failed to open document store", e))?;
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(|e| Error::connection_with_source("failed to migrate document store", e))?;
        Ok(Self {
            conn,
            embedding,
            splitter,
            store_dimensions: constants::D_STORE_DEFAULT,
        })
    }

    async fn upsert_library(&self, name: &str) -> Result<LibraryId> {
        let name = name.to_owned();
        self.conn
            .call(move |conn| {
                let id = LibraryId::from_name(&name);
                conn.execute(
                    "INSERT INTO libraries (id, name) VALUES (?1, ?2) ON CONFLICT(name) DO NOTHING",
                    params![id.to_string(), name],
                )?;
                Ok(id)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to resolve library", e))
    }

    async fn upsert_version(&self, library_id: LibraryId, name: &str) -> Result<VersionId> {
        let name = name.to_owned();
        self.conn
            .call(move |conn| {
                let id = VersionId::from_name(&format!("{library_id}:{name}"));
                let now_ts = now();
                conn.execute(
                    "INSERT INTO versions (id, library_id, name, status, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                     ON CONFLICT(library_id, name) DO NOTHING",
                    params![
                        id.to_string(),
                        library_id.to_string(),
                        name,
                        VersionStatus::NotIndexed.as_str(),
                        now_ts
                    ],
                )?;
                Ok(id)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to resolve version", e))
    }

    fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
        let path_json: String = row.get("path")?;
        let path: Vec<String> = serde_json::from_str(&path_json).unwrap_or_default();
        Ok(Document {
            id: DocumentId::new(row.get("id")?),
            library_id: LibraryId::from_string(&row.get::<_, String>("library_id")?),
            version_id: VersionId::from_string(&row.get::<_, String>("version_id")?),
            url: row.get("url")?,
            content: row.get("content")?,
            metadata: mcb_domain::entities::DocumentMetadata {
                title: row.get("title")?,
                url: row.get("url")?,
                section: Section {
                    path,
                    level: row.get::<_, i64>("level")? as u32,
                },
                mime_type: row.get("mime_type")?,
            },
            sort_order: row.get::<_, i64>("sort_order")? as u32,
            indexed_at: row.get("indexed_at")?,
        })
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    fn splitter(&self) -> &dyn ChunkSplitter {
        self.splitter.as_ref()
    }

    async fn resolve_ids(&self, library: &str, version: Option<&str>) -> Result<(LibraryId, VersionId)> {
        let library_name = mcb_domain::entities::Library::normalize_name(library);
        let version_name = mcb_domain::entities::Version::normalize_name(version);
        let library_id = self.upsert_library(&library_name).await?;
        let version_id = self.upsert_version(library_id, &version_name).await?;
        Ok((library_id, version_id))
    }

    async fn add_documents(&self, library: &str, version: Option<&str>, chunks: &[NewChunk]) -> Result<()> {
        let (library_id, version_id) = self.resolve_ids(library, version).await?;

        let mut by_url: Vec<(String, Vec<&NewChunk>)> = Vec::new();
        for chunk in chunks {
            if chunk.url.is_empty() {
                return Err(Error::validation("document url must not be empty"));
            }
            match by_url.iter_mut().find(|(u, _)| u == &chunk.url) {
                Some((_, group)) => group.push(chunk),
                None => by_url.push((chunk.url.clone(), vec![chunk])),
            }
        }

        for (url, group) in by_url {
            // Embed before touching any existing row for this URL: a
            // provider/network failure here must leave the prior group
            // untouched (§4.3 op2's "no partial URL group" atomicity).
            let inputs: Vec<String> = group
                .iter()
                .map(|c| embedding_input(c.title.as_deref(), &url, &c.section.path, &c.content))
                .collect();
            let embeddings = self.embed_in_batches(&inputs).await?;

            let url_c = url.clone();
            let rows: Vec<(String, Option<String>, String, String, u32, Option<String>, Vec<u8>)> = group
                .iter()
                .zip(embeddings.iter())
                .enumerate()
                .map(|(i, (chunk, vector))| {
                    let padded = self.embedding.to_store_embedding(vector.clone(), self.store_dimensions)?;
                    Ok::<_, Error>((
                        url_c.clone(),
                        chunk.title.clone(),
                        chunk.content.clone(),
                        serde_json::to_string(&chunk.section.path).unwrap_or_default(),
                        chunk.section.level,
                        chunk.mime_type.clone(),
                        encode_vector(&padded.vector),
                    ))
                })
                .collect::<Result<Vec<_>>>()?;

            let lib_id = library_id;
            let ver_id = version_id;
            let url_for_delete = url.clone();
            self.conn
                .call(move |conn| {
                    let tx = conn.transaction()?;

                    // Delete the existing group for this URL and the new
                    // rows are inserted below, all inside this one
                    // transaction: a failure past this point rolls back
                    // the delete along with it.
                    let existing_ids: Vec<i64> = tx
                        .prepare(
                            "SELECT id FROM documents WHERE library_id = ?1 AND version_id = ?2 AND url = ?3",
                        )?
                        .query_map(
                            params![lib_id.to_string(), ver_id.to_string(), url_for_delete],
                            |r| r.get(0),
                        )?
                        .collect::<rusqlite::Result<_>>()?;
                    for id in &existing_ids {
                        tx.execute("DELETE FROM documents_fts WHERE rowid = ?1", params![id])?;
                    }
                    tx.execute(
                        "DELETE FROM documents WHERE library_id = ?1 AND version_id = ?2 AND url = ?3",
                        params![lib_id.to_string(), ver_id.to_string(), url_for_delete],
                    )?;

                    for (idx, (url, title, content, path_json, level, mime_type, embedding)) in
                        rows.into_iter().enumerate()
                    {
                        let ts = now();
                        tx.execute(
                            "INSERT INTO documents
                                (library_id, version_id, url, content, title, path, level, mime_type, sort_order, indexed_at, embedding)
                             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11)",
                            params![
                                lib_id.to_string(),
                                ver_id.to_string(),
                                url,
                                content,
                                title,
                                path_json,
                                level,
                                mime_type,
                                idx as i64,
                                ts,
                                embedding,
                            ],
                        )?;
                        let rowid = tx.last_insert_rowid();
                        tx.execute(
                            "INSERT INTO documents_fts (rowid, title, content) VALUES (?1, ?2, ?3)",
                            params![rowid, title, content],
                        )?;
                    }
                    tx.commit()?;
                    Ok(())
                })
                .await
                .map_err(|e| Error::connection_with_source("failed to insert document batch", e))?;
        }

        Ok(())
    }

    async fn delete_documents(&self, library: &str, version: Option<&str>) -> Result<u64> {
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        self.conn
            .call(move |conn| {
                let ids: Vec<i64> = conn
                    .prepare("SELECT id FROM documents WHERE library_id = ?1 AND version_id = ?2")?
                    .query_map(params![library_id.to_string(), version_id.to_string()], |r| r.get(0))?
                    .collect::<rusqlite::Result<_>>()?;
                let tx = conn.transaction()?;
                for id in &ids {
                    tx.execute("DELETE FROM documents_fts WHERE rowid = ?1", params![id])?;
                }
                let count = tx.execute(
                    "DELETE FROM documents WHERE library_id = ?1 AND version_id = ?2",
                    params![library_id.to_string(), version_id.to_string()],
                )?;
                tx.commit()?;
                Ok(count as u64)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to delete documents", e))
    }

    async fn delete_documents_by_url(&self, library: &str, version: Option<&str>, url: &str) -> Result<u64> {
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        let url = url.to_owned();
        self.conn
            .call(move |conn| {
                let ids: Vec<i64> = conn
                    .prepare("SELECT id FROM documents WHERE library_id = ?1 AND version_id = ?2 AND url = ?3")?
                    .query_map(params![library_id.to_string(), version_id.to_string(), url], |r| r.get(0))?
                    .collect::<rusqlite::Result<_>>()?;
                let tx = conn.transaction()?;
                for id in &ids {
                    tx.execute("DELETE FROM documents_fts WHERE rowid = ?1", params![id])?;
                }
                let count = tx.execute(
                    "DELETE FROM documents WHERE library_id = ?1 AND version_id = ?2 AND url = ?3",
                    params![library_id.to_string(), version_id.to_string(), url],
                )?;
                tx.commit()?;
                Ok(count as u64)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to delete documents by url", e))
    }

    async fn remove_version(
        &self,
        library: &str,
        version: Option<&str>,
        remove_library_if_empty: bool,
    ) -> Result<RemoveVersionOutcome> {
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        let documents_deleted = self.delete_documents(library, version).await?;

        let outcome = self
            .conn
            .call(move |conn| {
                let version_deleted = conn.execute(
                    "DELETE FROM versions WHERE id = ?1",
                    params![version_id.to_string()],
                )? > 0;

                let remaining: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM versions WHERE library_id = ?1",
                    params![library_id.to_string()],
                    |r| r.get(0),
                )?;

                let library_deleted = if remaining == 0 && remove_library_if_empty {
                    conn.execute("DELETE FROM libraries WHERE id = ?1", params![library_id.to_string()])? > 0
                } else {
                    false
                };

                Ok((version_deleted, library_deleted))
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to remove version", e))?;

        Ok(RemoveVersionOutcome {
            documents_deleted,
            version_deleted: outcome.0,
            library_deleted: outcome.1,
        })
    }

    async fn check_document_exists(&self, library: &str, version: Option<&str>) -> Result<bool> {
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        self.conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM documents WHERE library_id = ?1 AND version_id = ?2",
                    params![library_id.to_string(), version_id.to_string()],
                    |r| r.get(0),
                )?;
                Ok(count > 0)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to check document existence", e))
    }

    async fn query_unique_versions(&self, library: &str) -> Result<Vec<String>> {
        let library_name = mcb_domain::entities::Library::normalize_name(library);
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT v.name FROM versions v JOIN libraries l ON l.id = v.library_id WHERE l.name = ?1",
                )?;
                let names = stmt
                    .query_map(params![library_name], |r| r.get::<_, String>(0))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(names)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to query versions", e))
    }

    async fn query_library_versions(&self) -> Result<HashMap<String, Vec<VersionRow>>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT l.name, v.id, v.name, v.status, v.progress_pages, v.progress_max_pages,
                            v.error_message, v.source_url,
                            (SELECT COUNT(*) FROM documents d WHERE d.version_id = v.id) AS doc_count,
                            (SELECT COUNT(DISTINCT d.url) FROM documents d WHERE d.version_id = v.id) AS url_count,
                            (SELECT MAX(d.indexed_at) FROM documents d WHERE d.version_id = v.id) AS indexed_at
                     FROM versions v JOIN libraries l ON l.id = v.library_id",
                )?;
                let rows = stmt.query_map([], |r| {
                    let lib_name: String = r.get(0)?;
                    let row = VersionRow {
                        library: lib_name.clone(),
                        version: r.get(2)?,
                        version_id: VersionId::from_string(&r.get::<_, String>(1)?),
                        status: status_from_str(&r.get::<_, String>(3)?),
                        progress_pages: r.get::<_, i64>(4)? as u32,
                        progress_max_pages: r.get::<_, i64>(5)? as u32,
                        error_message: r.get(6)?,
                        source_url: r.get(7)?,
                        document_count: r.get::<_, i64>(8)? as u64,
                        unique_url_count: r.get::<_, i64>(9)? as u64,
                        indexed_at: r.get(10)?,
                    };
                    Ok((lib_name, row))
                })?;

                let mut out: HashMap<String, Vec<VersionRow>> = HashMap::new();
                for entry in rows {
                    let (lib_name, row) = entry?;
                    out.entry(lib_name).or_default().push(row);
                }
                for versions in out.values_mut() {
                    versions.sort_by(|a, b| {
                        if a.version.is_empty() && !b.version.is_empty() {
                            return std::cmp::Ordering::Less;
                        }
                        if b.version.is_empty() && !a.version.is_empty() {
                            return std::cmp::Ordering::Greater;
                        }
                        match (semver::Version::parse(&a.version), semver::Version::parse(&b.version)) {
                            (Ok(sa), Ok(sb)) => sa.cmp(&sb),
                            _ => a.version.cmp(&b.version),
                        }
                    });
                }
                Ok(out)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to query library versions", e))
    }

    async fn find_by_content(
        &self,
        library: &str,
        version: Option<&str>,
        query: &str,
        limit: usize,
    ) -> Result<Vec<mcb_domain::value_objects::SearchHit>> {
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        let q_vec_raw = self.embedding.embed_query(query).await?;
        let q_vec = self.embedding.to_store_embedding(q_vec_raw, self.store_dimensions)?;

        let fts_query = quote_fts_query(query);

        let (vec_ranked, fts_ranked): (Vec<(i64, f32)>, Vec<i64>) = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, embedding FROM documents WHERE library_id = ?1 AND version_id = ?2",
                )?;
                let mut scored: Vec<(i64, f32)> = stmt
                    .query_map(params![library_id.to_string(), version_id.to_string()], |r| {
                        let id: i64 = r.get(0)?;
                        let blob: Vec<u8> = r.get(1)?;
                        Ok((id, blob))
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?
                    .into_iter()
                    .map(|(id, blob)| (id, cosine_similarity(&q_vec.vector, &decode_vector(&blob))))
                    .collect();
                scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
                scored.truncate(limit.max(1));

                let mut fts_stmt = conn.prepare(
                    "SELECT d.id FROM documents_fts f
                     JOIN documents d ON d.id = f.rowid
                     WHERE documents_fts MATCH ?1 AND d.library_id = ?2 AND d.version_id = ?3
                     ORDER BY bm25(documents_fts, 10.0, 1.0) ASC
                     LIMIT ?4",
                )?;
                let fts_ids = fts_stmt
                    .query_map(
                        params![fts_query, library_id.to_string(), version_id.to_string(), limit.max(1) as i64],
                        |r| r.get::<_, i64>(0),
                    )
                    .optional()?
                    .into_iter()
                    .flatten()
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .unwrap_or_default();

                Ok((scored, fts_ids))
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to search documents", e))?;

        let mut vec_rank: HashMap<i64, usize> = HashMap::new();
        for (rank, (id, _)) in vec_ranked.iter().enumerate() {
            vec_rank.insert(*id, rank + 1);
        }
        let mut fts_rank: HashMap<i64, usize> = HashMap::new();
        for (rank, id) in fts_ranked.iter().enumerate() {
            fts_rank.insert(*id, rank + 1);
        }

        let mut candidate_ids: Vec<i64> = vec_rank.keys().chain(fts_rank.keys()).copied().collect();
        candidate_ids.sort_unstable();
        candidate_ids.dedup();

        let mut fused: Vec<(i64, f64, Option<usize>, Option<usize>)> = candidate_ids
            .into_iter()
            .map(|id| {
                let vr = vec_rank.get(&id).copied();
                let fr = fts_rank.get(&id).copied();
                (id, rrf_score(vr, fr), vr, fr)
            })
            .collect();
        fused.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        fused.truncate(limit);

        let ids: Vec<DocumentId> = fused.iter().map(|(id, ..)| DocumentId::new(*id)).collect();
        let docs = self.find_chunks_by_ids(library, version, &ids).await?;
        let by_id: HashMap<i64, Document> = docs.into_iter().map(|d| (d.id.as_i64(), d)).collect();

        Ok(fused
            .into_iter()
            .filter_map(|(id, score, vr, fr)| {
                by_id.get(&id).map(|doc| mcb_domain::value_objects::SearchHit {
                    document: doc.clone(),
                    score: score as f32,
                    vec_rank: vr,
                    fts_rank: fr,
                })
            })
            .collect())
    }

    async fn get_by_id(&self, id: DocumentId) -> Result<Option<Document>> {
        self.conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT * FROM documents WHERE id = ?1",
                    params![id.as_i64()],
                    Self::row_to_document,
                )
                .optional()
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to fetch document", e))
    }

    async fn find_child_chunks(
        &self,
        library: &str,
        version: Option<&str>,
        parent: DocumentId,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let Some(reference) = self.get_by_id(parent).await? else {
            return Ok(Vec::new());
        };
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        let parent_len = reference.path().len() as i64;
        let parent_path = reference.path().to_vec();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT * FROM documents
                     WHERE library_id = ?1 AND version_id = ?2 AND url = ?3
                       AND sort_order > ?4
                     ORDER BY sort_order ASC",
                )?;
                let rows = stmt
                    .query_map(
                        params![
                            library_id.to_string(),
                            version_id.to_string(),
                            reference.url,
                            reference.sort_order,
                        ],
                        Self::row_to_document,
                    )?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows
                    .into_iter()
                    .filter(|d| d.path().len() as i64 == parent_len + 1 && d.path().starts_with(&parent_path))
                    .take(limit)
                    .collect())
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to find child chunks", e))
    }

    async fn find_preceding_siblings(
        &self,
        library: &str,
        version: Option<&str>,
        reference: DocumentId,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let Some(reference) = self.get_by_id(reference).await? else {
            return Ok(Vec::new());
        };
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        let ref_path = reference.path().to_vec();
        let siblings = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT * FROM documents
                     WHERE library_id = ?1 AND version_id = ?2 AND url = ?3 AND sort_order < ?4
                     ORDER BY sort_order DESC",
                )?;
                let rows = stmt
                    .query_map(
                        params![library_id.to_string(), version_id.to_string(), reference.url, reference.sort_order],
                        Self::row_to_document,
                    )?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to find preceding siblings", e))?;

        let mut filtered: Vec<Document> = siblings
            .into_iter()
            .filter(|d| d.path() == ref_path.as_slice())
            .take(limit)
            .collect();
        filtered.reverse();
        Ok(filtered)
    }

    async fn find_subsequent_siblings(
        &self,
        library: &str,
        version: Option<&str>,
        reference: DocumentId,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let Some(reference) = self.get_by_id(reference).await? else {
            return Ok(Vec::new());
        };
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        let ref_path = reference.path().to_vec();
        let siblings = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT * FROM documents
                     WHERE library_id = ?1 AND version_id = ?2 AND url = ?3 AND sort_order > ?4
                     ORDER BY sort_order ASC",
                )?;
                let rows = stmt
                    .query_map(
                        params![library_id.to_string(), version_id.to_string(), reference.url, reference.sort_order],
                        Self::row_to_document,
                    )?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to find subsequent siblings", e))?;

        Ok(siblings.into_iter().filter(|d| d.path() == ref_path.as_slice()).take(limit).collect())
    }

    async fn find_parent_chunk(
        &self,
        library: &str,
        version: Option<&str>,
        reference: DocumentId,
    ) -> Result<Option<Document>> {
        let Some(reference) = self.get_by_id(reference).await? else {
            return Ok(None);
        };
        let Some(parent_section) = reference.metadata.section.parent() else {
            return Ok(None);
        };
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        let candidates = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT * FROM documents
                     WHERE library_id = ?1 AND version_id = ?2 AND url = ?3 AND sort_order < ?4
                     ORDER BY sort_order DESC",
                )?;
                let rows = stmt
                    .query_map(
                        params![library_id.to_string(), version_id.to_string(), reference.url, reference.sort_order],
                        Self::row_to_document,
                    )?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to find parent chunk", e))?;

        Ok(candidates.into_iter().find(|d| d.path() == parent_section.path.as_slice()))
    }

    async fn find_chunks_by_ids(
        &self,
        library: &str,
        version: Option<&str>,
        ids: &[DocumentId],
    ) -> Result<Vec<Document>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let (library_id, version_id) = self.resolve_ids(library, version).await?;
        let ids: Vec<i64> = ids.iter().map(DocumentId::as_i64).collect();
        self.conn
            .call(move |conn| {
                let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
                let sql = format!(
                    "SELECT * FROM documents WHERE library_id = ? AND version_id = ? AND id IN ({placeholders})
                     ORDER BY sort_order ASC"
                );
                let mut stmt = conn.prepare(&sql)?;
                let mut bind_params: Vec<Box<dyn rusqlite::ToSql>> =
                    vec![Box::new(library_id.to_string()), Box::new(version_id.to_string())];
                for id in &ids {
                    bind_params.push(Box::new(*id));
                }
                let param_refs: Vec<&dyn rusqlite::ToSql> = bind_params.iter().map(AsRef::as_ref).collect();
                let rows = stmt
                    .query_map(param_refs.as_slice(), Self::row_to_document)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to fetch chunks by id", e))
    }

    async fn update_version_status(
        &self,
        version_id: VersionId,
        status: VersionStatus,
        error_message: Option<&str>,
    ) -> Result<()> {
        let error_message = error_message.map(str::to_owned);
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE versions SET status = ?1, error_message = ?2, updated_at = ?3 WHERE id = ?4",
                    params![status.as_str(), error_message, now(), version_id.to_string()],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to update version status", e))
    }

    async fn update_version_progress(&self, version_id: VersionId, pages: u32, max_pages: u32) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE versions SET progress_pages = ?1, progress_max_pages = ?2, updated_at = ?3 WHERE id = ?4",
                    params![pages, max_pages, now(), version_id.to_string()],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to update version progress", e))
    }

    async fn get_versions_by_status(&self, statuses: &[VersionStatus]) -> Result<Vec<VersionRow>> {
        let wanted: Vec<&'static str> = statuses.iter().map(VersionStatus::as_str).collect();
        self.conn
            .call(move |conn| {
                let placeholders = wanted.iter().map(|_| "?").collect::<Vec<_>>().join(",");
                let sql = format!(
                    "SELECT l.name, v.id, v.name, v.status, v.progress_pages, v.progress_max_pages,
                            v.error_message, v.source_url
                     FROM versions v JOIN libraries l ON l.id = v.library_id
                     WHERE v.status IN ({placeholders})"
                );
                let mut stmt = conn.prepare(&sql)?;
                let param_refs: Vec<&dyn rusqlite::ToSql> =
                    wanted.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
                let rows = stmt
                    .query_map(param_refs.as_slice(), |r| {
                        Ok(VersionRow {
                            library: r.get(0)?,
                            version_id: VersionId::from_string(&r.get::<_, String>(1)?),
                            version: r.get(2)?,
                            status: status_from_str(&r.get::<_, String>(3)?),
                            progress_pages: r.get::<_, i64>(4)? as u32,
                            progress_max_pages: r.get::<_, i64>(5)? as u32,
                            error_message: r.get(6)?,
                            source_url: r.get(7)?,
                            document_count: 0,
                            unique_url_count: 0,
                            indexed_at: None,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to query versions by status", e))
    }

    async fn store_scraper_options(
        &self,
        version_id: VersionId,
        source_url: &str,
        options: &PersistedScraperOptions,
    ) -> Result<()> {
        let source_url = source_url.to_owned();
        let payload = serde_json::to_string(options)?;
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE versions SET source_url = ?1, scraper_options = ?2, updated_at = ?3 WHERE id = ?4",
                    params![source_url, payload, now(), version_id.to_string()],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to store scraper options", e))
    }

    async fn get_scraper_options(&self, version_id: VersionId) -> Result<Option<StoredScraperOptions>> {
        let row: Option<(Option<String>, Option<String>)> = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT source_url, scraper_options FROM versions WHERE id = ?1",
                    params![version_id.to_string()],
                    |r| Ok((r.get(0)?, r.get(1)?)),
                )
                .optional()
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to fetch scraper options", e))?;

        let Some((Some(source_url), payload)) = row else {
            return Ok(None);
        };
        let options = payload
            .and_then(|p| serde_json::from_str(&p).ok())
            .unwrap_or_default();
        Ok(Some(StoredScraperOptions { source_url, options }))
    }

    async fn find_versions_by_source_url(&self, url: &str) -> Result<Vec<VersionRow>> {
        let url = url.to_owned();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT l.name, v.id, v.name, v.status, v.progress_pages, v.progress_max_pages,
                            v.error_message, v.source_url
                     FROM versions v JOIN libraries l ON l.id = v.library_id
                     WHERE v.source_url = ?1",
                )?;
                let rows = stmt
                    .query_map(params![url], |r| {
                        Ok(VersionRow {
                            library: r.get(0)?,
                            version_id: VersionId::from_string(&r.get::<_, String>(1)?),
                            version: r.get(2)?,
                            status: status_from_str(&r.get::<_, String>(3)?),
                            progress_pages: r.get::<_, i64>(4)? as u32,
                            progress_max_pages: r.get::<_, i64>(5)? as u32,
                            error_message: r.get(6)?,
                            source_url: r.get(7)?,
                            document_count: 0,
                            unique_url_count: 0,
                            indexed_at: None,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
            .map_err(|e| Error::connection_with_source("failed to find versions by source url", e))
    }
}

impl SqliteDocumentStore {
    /// Embed `inputs` honoring both `BATCH_COUNT` and `BATCH_CHARS` (§4.3
    /// op 2, P8): flush whenever either limit would next be exceeded.
    async fn embed_in_batches(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let batch_count = constants::batch_count_limit();
        let batch_chars = constants::batch_chars_limit();

        let mut results = Vec::with_capacity(inputs.len());
        let mut batch: Vec<String> = Vec::new();
        let mut batch_chars_used = 0usize;

        for input in inputs {
            let would_overflow_count = batch.len() + 1 > batch_count;
            let would_overflow_chars = !batch.is_empty() && batch_chars_used + input.chars().count() > batch_chars;
            if would_overflow_count || would_overflow_chars {
                results.extend(self.embedding.embed_documents(&batch).await?);
                batch.clear();
                batch_chars_used = 0;
            }
            batch_chars_used += input.chars().count();
            batch.push(input.clone());
        }
        if !batch.is_empty() {
            results.extend(self.embedding.embed_documents(&batch).await?);
        }
        Ok(results)
    }
}

/// Wrap a user query as a double-quoted phrase literal to neutralize FTS5
/// reserved syntax (`AND`, `OR`, `-`, `*`, ...) per §4.3 op 9.
fn quote_fts_query(query: &str) -> String {
    format!("\"{}\"", query.replace('"', "\"\""))
}
