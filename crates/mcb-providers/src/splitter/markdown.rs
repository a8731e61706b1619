//! Heading-sectioned splitting for Markdown/prose text (§4.1).
//!
//! Headings establish a hierarchical `path`/`level`; the body between one
//! heading and the next is greedily re-chunked against the
//! preferred/max/min size thresholds.

use mcb_domain::value_objects::{ContentChunk, Section, SplitterSizes};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use unicode_segmentation::UnicodeSegmentation;

struct Boundary {
    offset: usize,
    section: Section,
}

fn heading_depth(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Walk the document once, recording the heading-derived section that
/// governs each subsequent span of text.
fn boundaries(text: &str) -> Vec<Boundary> {
    let mut boundaries = vec![Boundary {
        offset: 0,
        section: Section::root(),
    }];
    let mut stack: Vec<(u32, String)> = Vec::new();
    let mut heading_title = String::new();
    let mut in_heading = false;
    let mut heading_level = 0u32;

    for (event, range) in Parser::new_ext(text, pulldown_cmark::Options::all()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                in_heading = true;
                heading_level = heading_depth(level);
                heading_title.clear();
            }
            Event::Text(t) | Event::Code(t) if in_heading => {
                heading_title.push_str(&t);
            }
            Event::End(TagEnd::Heading(_)) => {
                in_heading = false;
                while stack.last().is_some_and(|(level, _)| *level >= heading_level) {
                    stack.pop();
                }
                stack.push((heading_level, heading_title.trim().to_owned()));
                let path = stack.iter().map(|(_, title)| title.clone()).collect();
                boundaries.push(Boundary {
                    offset: range.end,
                    section: Section { path, level: heading_level },
                });
            }
            _ => {}
        }
    }

    boundaries
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()).collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn hard_split(text: &str, max: usize) -> Vec<String> {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return vec![text.to_owned()];
    }
    graphemes.chunks(max).map(|chunk| chunk.concat()).collect()
}

/// Greedily accumulate paragraphs up to `preferred`, hard-splitting any
/// paragraph that alone exceeds `max`, then coalesce trailing fragments
/// smaller than `min` into their neighbor when the merge still fits
/// within `preferred`.
fn chunk_body(paragraphs: &[&str], sizes: SplitterSizes) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for paragraph in paragraphs {
        if char_len(paragraph) > sizes.max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            chunks.extend(hard_split(paragraph, sizes.max));
            continue;
        }

        if !current.is_empty() && char_len(&current) + 2 + char_len(paragraph) > sizes.preferred {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    coalesce_small(chunks, sizes)
}

fn coalesce_small(chunks: Vec<String>, sizes: SplitterSizes) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for chunk in chunks {
        if let Some(previous) = merged.last_mut() {
            if char_len(&chunk) < sizes.min && char_len(previous) + 2 + char_len(&chunk) <= sizes.preferred {
                previous.push_str("\n\n");
                previous.push_str(&chunk);
                continue;
            }
        }
        merged.push(chunk);
    }
    merged
}

/// Split Markdown/prose `text` into heading-sectioned, size-bounded chunks.
pub(crate) fn split(text: &str, sizes: SplitterSizes) -> Vec<ContentChunk> {
    let boundaries = boundaries(text);
    let mut output = Vec::new();

    for (index, boundary) in boundaries.iter().enumerate() {
        let end = boundaries.get(index + 1).map_or(text.len(), |next| next.offset);
        if boundary.offset >= end {
            continue;
        }
        let body = text[boundary.offset..end].trim();
        if body.is_empty() {
            continue;
        }
        let paragraphs = split_paragraphs(body);
        for content in chunk_body(&paragraphs, sizes) {
            output.push(ContentChunk::new(content, boundary.section.clone()));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_establish_path_and_level() {
        let text = "# Guide\n\nIntro text.\n\n## Installation\n\nRun the installer.";
        let chunks = split(text, SplitterSizes::default());

        assert_eq!(chunks[0].section.path, ["Guide"]);
        assert_eq!(chunks[0].section.level, 1);
        assert_eq!(chunks[1].section.path, ["Guide", "Installation"]);
        assert_eq!(chunks[1].section.level, 2);
    }

    #[test]
    fn preferred_size_flushes_accumulated_paragraphs() {
        let paragraph = "x".repeat(100);
        let text = format!("# Title\n\n{paragraph}\n\n{paragraph}\n\n{paragraph}");
        let sizes = SplitterSizes { preferred: 150, max: 3000, min: 10 };
        let chunks = split(&text, sizes);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.content.len() <= sizes.preferred + 2 + 100 || chunk.content.len() <= sizes.max);
        }
    }

    #[test]
    fn oversized_paragraph_is_hard_split_below_max() {
        let text = format!("# Title\n\n{}", "a".repeat(500));
        let sizes = SplitterSizes { preferred: 100, max: 200, min: 10 };
        let chunks = split(&text, sizes);
        for chunk in &chunks {
            assert!(chunk.content.len() <= sizes.max);
        }
    }

    #[test]
    fn output_order_matches_input_order() {
        let text = "# A\n\nfirst\n\n## B\n\nsecond\n\n# C\n\nthird";
        let chunks = split(text, SplitterSizes::default());
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }
}
