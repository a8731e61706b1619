//! Durable schema for the document store (§4.3).
//!
//! A brute-force in-process scan stands in for the vector index: embeddings
//! are stored as a fixed-width `BLOB` of little-endian `f32`s and compared
//! at query time. This keeps the store file a single SQLite database with
//! no native extension loading (the workspace denies `unsafe_code`, which
//! a `sqlite-vec` FFI registration would require), and is adequate at the
//! per-library documentation-set scale this store targets.

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS libraries (
    id   TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS versions (
    id                 TEXT PRIMARY KEY,
    library_id         TEXT NOT NULL REFERENCES libraries(id),
    name               TEXT NOT NULL,
    status             TEXT NOT NULL,
    progress_pages     INTEGER NOT NULL DEFAULT 0,
    progress_max_pages INTEGER NOT NULL DEFAULT 0,
    error_message      TEXT,
    source_url         TEXT,
    scraper_options    TEXT,
    created_at         INTEGER NOT NULL,
    updated_at         INTEGER NOT NULL,
    UNIQUE(library_id, name)
);

CREATE TABLE IF NOT EXISTS documents (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    library_id  TEXT NOT NULL REFERENCES libraries(id),
    version_id  TEXT NOT NULL REFERENCES versions(id),
    url         TEXT NOT NULL,
    content     TEXT NOT NULL,
    title       TEXT,
    path        TEXT NOT NULL,
    level       INTEGER NOT NULL,
    mime_type   TEXT,
    sort_order  INTEGER NOT NULL,
    indexed_at  INTEGER NOT NULL,
    embedding   BLOB NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_documents_scope ON documents(library_id, version_id, url);
CREATE INDEX IF NOT EXISTS idx_documents_sort ON documents(library_id, version_id, url, sort_order);

CREATE VIRTUAL TABLE IF NOT EXISTS documents_fts USING fts5(
    title,
    content,
    content = '',
    contentless_delete = 1,
    tokenize = 'unicode61'
);
"#;
