//! Canonical form for person names.
//!
//! Both the spreadsheet names and the names pulled out of the gazette text go
//! through [`normalize`] before they are compared.

/// Marker of a trailing alias annotation, matched on the lower-cased name.
const ALIAS_MARKER: &str = "alias";

/// Normalize a raw name: lower-case, cut everything from the first `alias`
/// onwards, collapse whitespace runs to a single space, and trim.
///
/// `"John  Doe alias Jon Doe"` becomes `"john doe"`. The cut is a plain
/// substring match, so `"aliases"` and `"dalias"` also trigger it. Empty input
/// gives `""`.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut lower = raw.to_lowercase();
    if let Some(pos) = lower.find(ALIAS_MARKER) {
        lower.truncate(pos);
    }

    lower.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an optional cell value. A missing cell is "no name".
pub fn normalize_field(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("John Doe"), "john doe");
        assert_eq!(normalize("  JANE   Mary\tSmith \n"), "jane mary smith");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_strips_alias() {
        assert_eq!(normalize("John Doe alias Jon Doe"), "john doe");
        assert_eq!(normalize("John Doe ALIAS Jon Doe"), "john doe");
        assert_eq!(normalize("Peter Kamau Alias"), "peter kamau");
        assert_eq!(normalize("John Doe aliases Jon Doe"), "john doe");
        // Any occurrence of the letters cuts the name
        assert_eq!(normalize("Dalias Aliasson"), "d");
        assert_eq!(normalize("alias X"), "");
    }

    #[test]
    fn test_normalize_field_missing() {
        assert_eq!(normalize_field(None), "");
        assert_eq!(normalize_field(Some("")), "");
        assert_eq!(normalize_field(Some("Mary  Wanjiru")), "mary wanjiru");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "John Doe alias Jon Doe",
            "  MARY   ann  o'neil ",
            "Jean-Luc\u{00A0}Picard",
            "re: the estate of",
            "",
            "ALIAS only",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }
}
