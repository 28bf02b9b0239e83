//! Sync payload composition: destination resolution, title resolution, and
//! assembly of the wire request body. Pure; no I/O happens here.

use serde::Serialize;

use crate::frontmatter::{self, Frontmatter};
use crate::tags;
use crate::vault::Note;

/// Wire body for one article sync request. Built fresh per upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncPayload {
    /// Destination path in the catalog.
    pub path: String,
    /// Note body with the metadata block stripped.
    pub content: String,
    pub title: String,
    pub tags: Vec<String>,
    /// Serialises as `null` when the note has no metadata block.
    pub frontmatter: Option<Frontmatter>,
}

/// Computes the catalog destination for a note.
///
/// A non-empty override wins verbatim. Otherwise a configured default base
/// directory gives `{base}/{basename}`; failing that, the note's own path
/// with its extension removed. Collisions are not detected; the catalog
/// overwrites last-write-wins.
pub fn resolve_destination(
    note: &Note,
    default_path: Option<&str>,
    override_path: Option<&str>,
) -> String {
    if let Some(path) = override_path {
        if !path.is_empty() {
            return path.to_string();
        }
    }
    if let Some(base) = default_path {
        if !base.is_empty() {
            return format!("{}/{}", base, note.basename);
        }
    }
    match note.extension.as_str() {
        "" => note.path.clone(),
        ext => note
            .path
            .strip_suffix(&format!(".{ext}"))
            .unwrap_or(&note.path)
            .to_string(),
    }
}

/// Assembles the full payload for one note from its raw content.
///
/// Title resolution prefers a non-empty frontmatter `title` scalar and falls
/// back to the note's basename.
pub fn build_payload(
    note: &Note,
    content: &str,
    default_path: Option<&str>,
    override_path: Option<&str>,
) -> SyncPayload {
    let parsed = frontmatter::parse(content);
    let tags = tags::extract(content, parsed.frontmatter.as_ref());
    let path = resolve_destination(note, default_path, override_path);
    let title = parsed
        .frontmatter
        .as_ref()
        .and_then(|fields| fields.get("title"))
        .and_then(|value| value.as_scalar())
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| note.basename.clone());

    SyncPayload {
        path,
        content: parsed.body,
        title,
        tags,
        frontmatter: parsed.frontmatter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(path: &str) -> Note {
        Note::from_rel_path(path)
    }

    #[test]
    fn override_wins_verbatim() {
        let dest = resolve_destination(&note("journal/a.md"), Some("notes"), Some("x/y"));
        assert_eq!(dest, "x/y");
    }

    #[test]
    fn empty_override_is_ignored() {
        let dest = resolve_destination(&note("a.md"), Some("notes"), Some(""));
        assert_eq!(dest, "notes/a");
    }

    #[test]
    fn default_base_uses_basename() {
        let dest = resolve_destination(&note("journal/2024/a.md"), Some("notes"), None);
        assert_eq!(dest, "notes/a");
    }

    #[test]
    fn falls_back_to_own_path_without_extension() {
        let dest = resolve_destination(&note("journal/2024/a.md"), None, None);
        assert_eq!(dest, "journal/2024/a");
        let dest = resolve_destination(&note("a.md"), Some(""), None);
        assert_eq!(dest, "a");
    }

    #[test]
    fn title_prefers_frontmatter() {
        let payload = build_payload(
            &note("a.md"),
            "---\ntitle: Hello\n---\nBody",
            None,
            None,
        );
        assert_eq!(payload.title, "Hello");
        assert_eq!(payload.content, "Body");
    }

    #[test]
    fn title_falls_back_to_basename() {
        let payload = build_payload(&note("journal/monday.md"), "no metadata", None, None);
        assert_eq!(payload.title, "monday");
        assert_eq!(payload.content, "no metadata");
        assert!(payload.frontmatter.is_none());
    }

    #[test]
    fn empty_frontmatter_title_falls_back() {
        let payload = build_payload(&note("a.md"), "---\ntitle:\n---\nBody", None, None);
        assert_eq!(payload.title, "a");
    }

    #[test]
    fn composes_tags_and_destination() {
        let payload = build_payload(
            &note("a.md"),
            "---\ntitle: Hello\ntags: [a, b]\n---\nBody #c",
            Some("notes"),
            None,
        );
        assert_eq!(payload.path, "notes/a");
        assert_eq!(payload.tags, vec!["a", "b", "c"]);
        assert_eq!(payload.content, "Body #c");
    }

    #[test]
    fn wire_shape_includes_null_frontmatter() {
        let payload = build_payload(&note("a.md"), "plain", None, None);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["path"], serde_json::json!("a"));
        assert_eq!(json["frontmatter"], serde_json::Value::Null);
        assert_eq!(json["tags"], serde_json::json!([]));
    }
}
