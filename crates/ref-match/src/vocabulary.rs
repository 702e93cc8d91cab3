//! Provider `type` vocabulary mapped into the local (CSL) vocabulary.

/// Map a provider work type onto the local vocabulary.
///
/// Unmapped values pass through unchanged.
#[must_use]
pub fn map_remote_type(kind: &str) -> &str {
    match kind {
        "journal-article" => "article-journal",
        "book-chapter" | "book-section" | "book-part" => "chapter",
        "proceedings-article" => "paper-conference",
        "posted-content" => "article",
        "monograph" | "edited-book" | "reference-book" => "book",
        "reference-entry" => "entry",
        "dissertation" => "thesis",
        "report-component" => "report",
        other => other,
    }
}
