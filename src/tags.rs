//! Tag extraction from frontmatter and inline `#tag` markers.

use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::{Frontmatter, Value};

/// Inline tag marker: `#` followed by ASCII word characters or CJK
/// ideographs. Matches the marker syntax the catalog indexes on.
static TAG_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#[0-9A-Za-z_\x{4e00}-\x{9fa5}]+").expect("tag marker pattern compiles")
});

/// Collects the deduplicated tag set for a note.
///
/// Frontmatter `tags` come first in their declared order (a list is taken
/// as-is; a scalar is split on commas). Inline `#tag` markers found anywhere
/// in the raw text, including the metadata block, fill in afterwards in
/// scan order. Appends are case-sensitive and never duplicate an earlier tag.
pub fn extract(content: &str, frontmatter: Option<&Frontmatter>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    if let Some(fields) = frontmatter {
        match fields.get("tags") {
            Some(Value::List(items)) => {
                for item in items {
                    push_unique(&mut tags, item);
                }
            }
            Some(Value::Scalar(joined)) => {
                for item in joined.split(',') {
                    push_unique(&mut tags, item.trim());
                }
            }
            None => {}
        }
    }

    for found in TAG_MARKER.find_iter(content) {
        push_unique(&mut tags, &found.as_str()[1..]);
    }

    tags
}

fn push_unique(tags: &mut Vec<String>, candidate: &str) {
    if candidate.is_empty() {
        return;
    }
    if !tags.iter().any(|existing| existing == candidate) {
        tags.push(candidate.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;

    #[test]
    fn frontmatter_list_then_inline_markers() {
        let text = "---\ntitle: Hello\ntags: [a, b]\n---\nBody #c";
        let parsed = frontmatter::parse(text);
        let tags = extract(text, parsed.frontmatter.as_ref());
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn inline_only_with_duplicates() {
        let text = "note #work #work";
        let tags = extract(text, None);
        assert_eq!(tags, vec!["work"]);
    }

    #[test]
    fn scalar_tags_split_on_comma() {
        let text = "---\ntags: rust, async , rust\n---\nbody";
        let parsed = frontmatter::parse(text);
        let tags = extract(text, parsed.frontmatter.as_ref());
        assert_eq!(tags, vec!["rust", "async"]);
    }

    #[test]
    fn frontmatter_tags_take_priority_of_position() {
        let text = "---\ntags: [beta]\n---\n#alpha then #beta again";
        let parsed = frontmatter::parse(text);
        let tags = extract(text, parsed.frontmatter.as_ref());
        assert_eq!(tags, vec!["beta", "alpha"]);
    }

    #[test]
    fn cjk_ideographs_are_word_characters() {
        let tags = extract("笔记 #中文 and #mixed_1", None);
        assert_eq!(tags, vec!["中文", "mixed_1"]);
    }

    #[test]
    fn marker_stops_at_non_word_character() {
        let tags = extract("see #tag. and #tag-suffix", None);
        assert_eq!(tags, vec!["tag"]);
    }

    #[test]
    fn metadata_block_is_also_scanned() {
        let text = "---\nnote: has #inline marker\n---\nbody";
        let parsed = frontmatter::parse(text);
        let tags = extract(text, parsed.frontmatter.as_ref());
        assert_eq!(tags, vec!["inline"]);
    }

    #[test]
    fn never_produces_duplicates() {
        let text = "---\ntags: [x, x]\n---\n#x #y #x";
        let parsed = frontmatter::parse(text);
        let tags = extract(text, parsed.frontmatter.as_ref());
        assert_eq!(tags, vec!["x", "y"]);
    }

    #[test]
    fn empty_inputs_yield_empty_set() {
        assert!(extract("no markers here", None).is_empty());
    }
}
