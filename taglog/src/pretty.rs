//! Pretty-printers for values that are awkward to read on one line.
//!
//! Pure string builders, no I/O: the result goes into an ordinary log call.
//!
//! ```
//! taglog::debug(&taglog::pretty::hex(&[0x0F, 0xCD, 0xAD]));
//! ```

use std::fmt::Display;
use std::fmt::Write as _;

const LIST_BANNER: &str = "-------------------------- List --------------------------\n";
const MAP_BANNER: &str = "-------------------------- Map ---------------------------\n";
const CLOSING_LINE: &str = "----------------------------------------------------------\n";

/// Hex representation of a byte slice, like `0F CD AD `.
pub fn hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for byte in data {
        let _ = write!(out, "{:02X} ", byte);
    }
    out
}

/// Hex representation split into lines of `per_line` bytes.
///
/// A `per_line` of zero yields one line (same as [`hex`]).
pub fn hex_lines(data: &[u8], per_line: usize) -> Vec<String> {
    if per_line == 0 {
        return vec![hex(data)];
    }
    data.chunks(per_line).map(hex).collect()
}

/// Banner-framed representation of a sequence, one item per line.
pub fn list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = String::from(LIST_BANNER);
    for item in items {
        let _ = writeln!(out, "{}", item);
    }
    out.push_str(CLOSING_LINE);
    out
}

/// Banner-framed representation of key-value pairs, one per line, with keys
/// padded to the longest key so the values line up.
pub fn map<I, K, V>(entries: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let entries: Vec<(String, String)> = entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let key_width = entries.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);

    let mut out = String::from(MAP_BANNER);
    for (key, value) in &entries {
        let _ = writeln!(out, "{:<width$} = {}", key, value, width = key_width);
    }
    out.push_str(CLOSING_LINE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formats_bytes() {
        assert_eq!(hex(&[0x0F, 0xCD, 0xAD]), "0F CD AD ");
    }

    #[test]
    fn test_hex_of_empty_slice() {
        assert_eq!(hex(&[]), "");
    }

    #[test]
    fn test_hex_lines_chunks() {
        let lines = hex_lines(&[1, 2, 3, 4, 5], 2);
        assert_eq!(lines, vec!["01 02 ", "03 04 ", "05 "]);
    }

    #[test]
    fn test_hex_lines_zero_per_line() {
        assert_eq!(hex_lines(&[1, 2], 0), vec!["01 02 "]);
    }

    #[test]
    fn test_list_banners_and_items() {
        let out = list(["alpha", "beta"]);
        assert!(out.starts_with(LIST_BANNER));
        assert!(out.ends_with(CLOSING_LINE));
        assert!(out.contains("alpha\n"));
        assert!(out.contains("beta\n"));
    }

    #[test]
    fn test_map_aligns_keys() {
        let out = map([("id", "7"), ("hostname", "edge-1")]);
        assert!(out.contains("id       = 7\n"));
        assert!(out.contains("hostname = edge-1\n"));
    }

    #[test]
    fn test_map_of_empty_input() {
        let out = map(Vec::<(String, String)>::new());
        assert!(out.starts_with(MAP_BANNER));
        assert!(out.ends_with(CLOSING_LINE));
    }
}
