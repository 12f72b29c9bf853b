//! Helpers for cleaning up the captured output of external commands.

use std::collections::HashSet;

/// Remove every line-break character from `s` and trim surrounding
/// whitespace.
///
/// Besides `\n` and `\r` this also drops vertical tab, form feed, NEL and the
/// Unicode line/paragraph separators, so a value spread over several lines
/// collapses into one.
pub fn filter_new_lines(s: &str) -> String {
    s.chars()
        .filter(|c| {
            !matches!(
                c,
                '\u{000A}' | '\u{000B}' | '\u{000C}' | '\u{000D}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
            )
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split a `WM_CLASS` value (`"navigator", "Firefox"`) into its tokens.
///
/// Tokens are split on `,`, stripped of double quotes and trimmed.
pub fn clean_names(s: &str) -> Vec<String> {
    s.split(',')
        .map(|token| token.replace('"', "").trim().to_string())
        .collect()
}

/// Drop duplicates from `ids`, keeping the first occurrence of each value.
pub fn unique_in_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filter_new_lines_strips_breaks_and_trims() {
        assert_eq!(filter_new_lines("  1234\n"), "1234");
        assert_eq!(filter_new_lines("12\r\n34"), "1234");
        assert_eq!(filter_new_lines("a\u{2028}b\u{0085}c\u{000B}"), "abc");
        assert_eq!(filter_new_lines("\n\n"), "");
    }

    #[test]
    fn clean_names_removes_quotes() {
        assert_eq!(
            clean_names(r#""navigator", "Firefox""#),
            strings(&["navigator", "Firefox"])
        );
        assert_eq!(clean_names(r#""xterm""#), strings(&["xterm"]));
    }

    #[test]
    fn unique_keeps_first_seen_order() {
        let ids = strings(&["0x3", "0x1", "0x3", "0x2", "0x1"]);
        assert_eq!(unique_in_order(ids), strings(&["0x3", "0x1", "0x2"]));
    }

    #[test]
    fn unique_has_no_duplicates() {
        let ids = strings(&["a", "a", "a", "b", "a", "c", "b"]);
        let out = unique_in_order(ids);
        let set: HashSet<&String> = out.iter().collect();
        assert_eq!(set.len(), out.len());
        assert_eq!(out, strings(&["a", "b", "c"]));
    }

    #[test]
    fn unique_of_empty_is_empty() {
        assert!(unique_in_order(Vec::new()).is_empty());
    }
}
