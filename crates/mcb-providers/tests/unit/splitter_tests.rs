//! End-to-end `DefaultChunkSplitter` behavior across size thresholds (§4.1).

use mcb_domain::ports::ChunkSplitter;
use mcb_domain::value_objects::SplitterSizes;
use mcb_providers::splitter::DefaultChunkSplitter;
use rstest::rstest;

#[test]
fn markdown_output_preserves_document_order() {
    let splitter = DefaultChunkSplitter::new();
    let text = "# Intro\n\nFirst.\n\n## Details\n\nSecond.\n\n# Outro\n\nThird.";
    let chunks = splitter.split(text, None).unwrap();
    let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, ["First.", "Second.", "Third."]);
}

#[test]
fn custom_sizes_are_reported_back() {
    let sizes = SplitterSizes { preferred: 10, max: 20, min: 2 };
    let splitter = DefaultChunkSplitter::with_sizes(sizes);
    assert_eq!(splitter.sizes(), sizes);
}

#[test]
fn code_mime_type_never_exceeds_max() {
    let sizes = SplitterSizes { preferred: 50, max: 100, min: 5 };
    let splitter = DefaultChunkSplitter::with_sizes(sizes);
    let source = (0..50).map(|i| format!("let v{i} = {i};")).collect::<Vec<_>>().join("\n");
    let chunks = splitter.split(&source, Some("text/x-rust")).unwrap();
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.content.len() <= sizes.max);
    }
}

/// `ContentKind::from_mime_type` treats absent/plain mime hints as prose,
/// routing them through the paragraph-aware Markdown splitter regardless
/// of the exact mime string.
#[rstest]
#[case::absent(None)]
#[case::markdown(Some("text/markdown"))]
#[case::plain_text(Some("text/plain"))]
fn non_code_mime_types_use_markdown_splitting(#[case] mime_type: Option<&str>) {
    let splitter = DefaultChunkSplitter::new();
    let text = "# Intro\n\nFirst.\n\n## Details\n\nSecond.";
    let chunks = splitter.split(text, mime_type).unwrap();
    assert_eq!(chunks[0].content, "First.");
    assert_eq!(chunks[1].content, "Second.");
}

/// Any mime type starting with `text/x-` or merely containing "code"
/// (not just the `text/x-rust` case already covered above) is routed
/// through the size-capped code splitter.
#[rstest]
#[case::python("text/x-python")]
#[case::shell("text/x-sh")]
#[case::vendor_code_suffix("application/vnd.example.code")]
fn code_like_mime_types_use_code_splitting(#[case] mime_type: &str) {
    let sizes = SplitterSizes { preferred: 20, max: 40, min: 2 };
    let splitter = DefaultChunkSplitter::with_sizes(sizes);
    let source = (0..30).map(|i| format!("let v{i} = {i};")).collect::<Vec<_>>().join("\n");
    let chunks = splitter.split(&source, Some(mime_type)).unwrap();
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.content.len() <= sizes.max);
    }
}
