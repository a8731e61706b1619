//! Source-code splitting (§4.1): one code-block chunk below `max`,
//! preferring to break on line boundaries.

use mcb_domain::value_objects::{ContentChunk, Section, SplitterSizes};
use unicode_segmentation::UnicodeSegmentation;

fn hard_split_line(line: &str, max: usize) -> Vec<String> {
    let graphemes: Vec<&str> = line.graphemes(true).collect();
    graphemes.chunks(max).map(|chunk| chunk.concat()).collect()
}

/// Split source `text` into chunks no larger than `sizes.max`, greedily
/// filling toward `sizes.preferred` and breaking on line boundaries.
pub(crate) fn split(text: &str, sizes: SplitterSizes) -> Vec<ContentChunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.len() > sizes.max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            chunks.extend(hard_split_line(line, sizes.max));
            continue;
        }

        if !current.is_empty() && current.len() + 1 + line.len() > sizes.preferred {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks.into_iter().map(|content| ContentChunk::new(content, Section::root())).collect()
}
