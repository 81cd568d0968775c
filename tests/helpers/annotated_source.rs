//! Annotated-source test harness.
//!
//! Test sources mark the selection inline: `[|text|]` selects `text`, and
//! `[||]` places a zero-width caret. The markers are stripped before
//! parsing; the returned range is in stripped-source offsets.

use breakname::TextRange;
use text_size::TextSize;

pub const ANNOTATION_START: &str = "[|";
pub const ANNOTATION_END: &str = "|]";

/// Split an annotated source into the plain source and the selection range.
///
/// Panics when a marker is missing, duplicated, or out of order, so a typo
/// in a test source fails loudly.
pub fn parse_annotated(annotated: &str) -> (String, TextRange) {
    let start = single_index_of(annotated, ANNOTATION_START)
        .expect("source must contain exactly one [| marker");
    let end = single_index_of(annotated, ANNOTATION_END)
        .expect("source must contain exactly one |] marker");

    let inner_start = start + ANNOTATION_START.len();
    assert!(
        end >= inner_start,
        "the |] marker must come after the [| marker"
    );

    let mut source = String::with_capacity(annotated.len());
    source.push_str(&annotated[..start]);
    source.push_str(&annotated[inner_start..end]);
    source.push_str(&annotated[end + ANNOTATION_END.len()..]);

    let range = TextRange::at(
        TextSize::new(start as u32),
        TextSize::new((end - inner_start) as u32),
    );
    (source, range)
}

fn single_index_of(haystack: &str, needle: &str) -> Option<usize> {
    let index = haystack.find(needle)?;
    match haystack[index + needle.len()..].find(needle) {
        Some(_) => None,
        None => Some(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_markers() {
        let (source, range) = parse_annotated("void [|B|]()");
        assert_eq!(source, "void B()");
        assert_eq!(range, TextRange::new(TextSize::new(5), TextSize::new(6)));
    }

    #[test]
    fn test_caret_marker() {
        let (source, range) = parse_annotated("void B[||]()");
        assert_eq!(source, "void B()");
        assert!(range.is_empty());
        assert_eq!(range.start(), TextSize::new(6));
    }
}
