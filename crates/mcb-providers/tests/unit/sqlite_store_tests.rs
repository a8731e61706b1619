//! `SqliteDocumentStore` behavior against a temp-file database (§4.3).

use std::sync::Arc;

use async_trait::async_trait;
use mcb_domain::error::Result;
use mcb_domain::ports::{ChunkSplitter, DocumentStore, EmbeddingProvider, NewChunk};
use mcb_domain::value_objects::{ContentChunk, ScrapedDocument, ScrapedMetadata, Section};
use mcb_providers::splitter::DefaultChunkSplitter;
use mcb_providers::SqliteDocumentStore;

mockall::mock! {
    pub Splitter {}

    impl ChunkSplitter for Splitter {
        fn split(&self, text: &str, mime_type: Option<&str>) -> Result<Vec<ContentChunk>>;
        fn sizes(&self) -> mcb_domain::value_objects::SplitterSizes;
    }
}

/// A deterministic embedding stand-in: every text maps to a vector derived
/// from its byte length, so equal-length inputs collide and distinct
/// lengths are trivially distinguishable in cosine-similarity tests.
struct FakeEmbeddingProvider;

#[async_trait]
impl EmbeddingProvider for FakeEmbeddingProvider {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let seed = text.len() as f32;
                vec![seed, seed / 2.0, 1.0]
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn provider_name(&self) -> &str {
        "fake"
    }
}

async fn open_store() -> (SqliteDocumentStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = SqliteDocumentStore::open(path, Arc::new(FakeEmbeddingProvider), Arc::new(DefaultChunkSplitter::new()))
        .await
        .unwrap();
    (store, dir)
}

fn chunk(url: &str, title: &str, content: &str) -> NewChunk {
    NewChunk {
        url: url.to_owned(),
        title: Some(title.to_owned()),
        content: content.to_owned(),
        section: Section::root(),
        mime_type: None,
    }
}

#[tokio::test]
async fn add_documents_then_find_by_content_returns_hits() {
    let (store, _dir) = open_store().await;
    store
        .add_documents(
            "react",
            Some("18.2.0"),
            &[chunk("https://react.dev/learn", "Learn React", "Components let you split the UI into independent pieces.")],
        )
        .await
        .unwrap();

    let hits = store.find_by_content("react", Some("18.2.0"), "components", 10).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].fts_rank.is_some());
}

#[tokio::test]
async fn add_documents_is_idempotent_per_url() {
    let (store, _dir) = open_store().await;
    let url = "https://react.dev/learn";
    store.add_documents("react", None, &[chunk(url, "Learn", "first version of the page")]).await.unwrap();
    store.add_documents("react", None, &[chunk(url, "Learn", "second version of the page")]).await.unwrap();

    assert!(store.check_document_exists("react", None).await.unwrap());
    let hits = store.find_by_content("react", None, "second", 10).await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn remove_version_deletes_documents_and_empty_library() {
    let (store, _dir) = open_store().await;
    store.add_documents("vue", Some("3.0.0"), &[chunk("https://vuejs.org/guide", "Guide", "Vue basics")]).await.unwrap();

    let outcome = store.remove_version("vue", Some("3.0.0"), true).await.unwrap();
    assert_eq!(outcome.documents_deleted, 1);
    assert!(outcome.version_deleted);
    assert!(outcome.library_deleted);
    assert!(!store.check_document_exists("vue", Some("3.0.0")).await.unwrap());
}

/// `add_document` delegates splitting to `DocumentStore::splitter()` and
/// maps the returned chunks onto the scraped document's own url/title
/// before handing them to `add_documents` — exercised here with a mock
/// splitter instead of `DefaultChunkSplitter` so the split boundaries are
/// asserted directly rather than inferred from Markdown heading rules.
#[tokio::test]
async fn add_document_delegates_splitting_to_the_configured_splitter() {
    let mut mock_splitter = MockSplitter::new();
    mock_splitter.expect_split().times(1).returning(|_, _| {
        Ok(vec![
            ContentChunk::new("mocked chunk one", Section::root()),
            ContentChunk::new("mocked chunk two", Section::root()),
        ])
    });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = SqliteDocumentStore::open(path, Arc::new(FakeEmbeddingProvider), Arc::new(mock_splitter))
        .await
        .unwrap();

    let doc = ScrapedDocument {
        content: "raw page body, never inspected directly by the store".to_owned(),
        content_type: None,
        metadata: ScrapedMetadata {
            url: "https://example.com/page".to_owned(),
            title: Some("Page".to_owned()),
            extra: serde_json::Map::new(),
        },
    };
    store.add_document("lib", None, &doc).await.unwrap();

    let hits = store.find_by_content("lib", None, "mocked", 10).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.document.url == "https://example.com/page"));
}

fn chunk_at(url: &str, title: &str, content: &str, section: Section) -> NewChunk {
    NewChunk {
        url: url.to_owned(),
        title: Some(title.to_owned()),
        content: content.to_owned(),
        section,
        mime_type: None,
    }
}

fn section(path: &[&str]) -> Section {
    Section {
        path: path.iter().map(|s| s.to_string()).collect(),
        level: path.len() as u32,
    }
}

/// Inserts one page ("Guide") with a root intro chunk, two prose chunks
/// under the same "Install" heading (siblings — identical section path),
/// one "Step One" sub-heading chunk nested under "Install", and a
/// trailing "Usage" heading chunk. Returns the five chunk ids in
/// insertion order: intro, install-p1, install-p2, step, usage.
async fn seeded_hierarchy(store: &SqliteDocumentStore) -> Vec<mcb_domain::value_objects::DocumentId> {
    let url = "https://docs.example.com/guide";
    store
        .add_documents(
            "hier",
            None,
            &[
                chunk_at(url, "Guide", "Welcome to the guide.", Section::root()),
                chunk_at(url, "Guide", "Install overview, part one.", section(&["Install"])),
                chunk_at(url, "Guide", "Install overview, part two.", section(&["Install"])),
                chunk_at(url, "Guide", "Step one: download.", section(&["Install", "Step One"])),
                chunk_at(url, "Guide", "Usage overview.", section(&["Usage"])),
            ],
        )
        .await
        .unwrap();

    // All five chunks share the title "Guide"; a single-word FTS phrase
    // match on it is enough to pull back the whole page regardless of
    // vector similarity, which `open_store`'s fake provider does not
    // otherwise control here.
    let hits = store.find_by_content("hier", None, "Guide", 10).await.unwrap();
    let mut by_content: Vec<_> = hits.into_iter().map(|h| h.document).collect();
    by_content.sort_by_key(|d| d.sort_order);
    by_content.into_iter().map(|d| d.id).collect()
}

#[tokio::test]
async fn find_child_chunks_returns_only_one_level_deeper_under_the_same_prefix() {
    let (store, _dir) = open_store().await;
    let ids = seeded_hierarchy(&store).await;
    let (intro, install_p1, install_p2, step, usage) = (ids[0], ids[1], ids[2], ids[3], ids[4]);

    // `step` is nested directly under either "Install" chunk's path;
    // querying from the first one still finds it regardless of which
    // sibling happens to precede it.
    let children = store.find_child_chunks("hier", None, install_p1, 10).await.unwrap();
    assert_eq!(children.iter().map(|d| d.id).collect::<Vec<_>>(), vec![step]);

    // `intro` sits at section root; every top-level heading chunk that
    // follows it is one level deeper with an empty (matching) prefix.
    let root_children = store.find_child_chunks("hier", None, intro, 10).await.unwrap();
    assert_eq!(root_children.iter().map(|d| d.id).collect::<Vec<_>>(), vec![install_p1, install_p2, usage]);

    assert!(store.find_child_chunks("hier", None, usage, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn find_parent_chunk_finds_the_nearest_preceding_chunk_one_level_up() {
    let (store, _dir) = open_store().await;
    let ids = seeded_hierarchy(&store).await;
    let (intro, install_p1, install_p2, step) = (ids[0], ids[1], ids[2], ids[3]);

    // `step`'s parent path is "Install"; the nearest preceding chunk at
    // that path is the second "Install" prose chunk, not the first.
    let parent_of_step = store.find_parent_chunk("hier", None, step).await.unwrap().unwrap();
    assert_eq!(parent_of_step.id, install_p2);

    let parent_of_install_p1 = store.find_parent_chunk("hier", None, install_p1).await.unwrap().unwrap();
    assert_eq!(parent_of_install_p1.id, intro);

    assert!(store.find_parent_chunk("hier", None, intro).await.unwrap().is_none());
}

#[tokio::test]
async fn sibling_navigation_only_matches_chunks_at_the_identical_section_path() {
    let (store, _dir) = open_store().await;
    let ids = seeded_hierarchy(&store).await;
    let (install_p1, install_p2, step) = (ids[1], ids[2], ids[3]);

    let after_install_p1 = store.find_subsequent_siblings("hier", None, install_p1, 10).await.unwrap();
    assert_eq!(after_install_p1.iter().map(|d| d.id).collect::<Vec<_>>(), vec![install_p2]);

    let before_install_p2 = store.find_preceding_siblings("hier", None, install_p2, 10).await.unwrap();
    assert_eq!(before_install_p2.iter().map(|d| d.id).collect::<Vec<_>>(), vec![install_p1]);

    // `step` sits one level deeper than the "Install" chunks, so it has
    // no siblings at all (it is the only chunk at its own path).
    assert!(store.find_subsequent_siblings("hier", None, step, 10).await.unwrap().is_empty());
    assert!(store.find_preceding_siblings("hier", None, install_p1, 10).await.unwrap().is_empty());
}

/// A fake embedding provider whose cosine similarity to the query depends
/// only on whether a marker appears in the chunk's *URL* (not indexed by
/// FTS5), letting vector and full-text relevance be controlled
/// independently for a single document set.
struct DualSignalEmbeddingProvider;

#[async_trait]
impl EmbeddingProvider for DualSignalEmbeddingProvider {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let url_segment = text
                    .split_once("<url>")
                    .and_then(|(_, rest)| rest.split_once("</url>"))
                    .map_or(text.as_str(), |(url, _)| url);
                if url_segment.contains("VECSIG") {
                    vec![1.0, 0.0, 0.0]
                } else {
                    vec![0.0, 1.0, 0.0]
                }
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn provider_name(&self) -> &str {
        "dual-signal"
    }
}

#[tokio::test]
async fn hybrid_search_ranks_a_dual_engine_match_above_either_single_engine_match() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = SqliteDocumentStore::open(path, Arc::new(DualSignalEmbeddingProvider), Arc::new(DefaultChunkSplitter::new()))
        .await
        .unwrap();

    store
        .add_documents(
            "fusion",
            None,
            &[
                chunk(
                    "https://example.com/VECSIG-both",
                    "Both signals",
                    "This passage mentions VECSIG directly inside its prose.",
                ),
                chunk(
                    "https://example.com/VECSIG-vector-only",
                    "Vector only",
                    "An unrelated passage about brewing science and fermentation.",
                ),
                chunk(
                    "https://example.com/plain-fts-only",
                    "FTS only",
                    "A different passage whose only tie to the query is the literal word VECSIG.",
                ),
                chunk(
                    "https://example.com/plain-neither",
                    "Neither",
                    "Nothing here relates to the query at all.",
                ),
            ],
        )
        .await
        .unwrap();

    // The query text itself carries the vector marker, so the query
    // embeds to [1, 0, 0] and only chunks whose URL also carries the
    // marker score nonzero cosine similarity against it.
    let hits = store.find_by_content("fusion", None, "VECSIG", 2).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].document.url, "https://example.com/VECSIG-both");
    assert!(hits[0].vec_rank.is_some());
    assert!(hits[0].fts_rank.is_some());
    assert!(hits[0].score > hits[1].score, "a dual-engine match must outrank a single-engine one");
}

#[tokio::test]
async fn query_library_versions_orders_unversioned_first_then_semver() {
    let (store, _dir) = open_store().await;
    store.resolve_ids("lib", Some("2.0.0")).await.unwrap();
    store.resolve_ids("lib", Some("1.0.0")).await.unwrap();
    store.resolve_ids("lib", None).await.unwrap();

    let versions = store.query_library_versions().await.unwrap();
    let rows = &versions["lib"];
    let names: Vec<&str> = rows.iter().map(|row| row.version.as_str()).collect();
    assert_eq!(names, ["", "1.0.0", "2.0.0"]);
}
