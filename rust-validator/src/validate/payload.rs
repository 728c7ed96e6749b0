//! Launch payload parsing and canonicalization.
//!
//! A launch payload arrives as an `application/x-www-form-urlencoded`-shaped
//! string. Before the signature can be checked, the payload is decoded into
//! a field map and re-serialized into the canonical byte sequence the
//! platform signed.

use url::form_urlencoded;

/// A launch payload decoded into its signed fields and claimed signature.
#[derive(Debug, Clone)]
pub(crate) struct ParsedPayload {
    /// Decoded fields in arrival order, excluding `hash`.
    pub fields: Vec<(String, String)>,
    /// The value of the `hash` field, or empty if the payload carried none.
    pub claimed_hash: String,
}

impl ParsedPayload {
    /// Look up a decoded field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Parse a raw launch payload into fields and the claimed signature.
///
/// Parsing is relaxed: pairs are split on `&`, keys and values are
/// percent-decoded independently (malformed escapes are passed through
/// as-is), and a pair with no `=` becomes a key with an empty value.
/// Duplicate keys take the first occurrence; the platform's contract does
/// not define duplicates, so later ones are dropped.
pub(crate) fn parse_init_data(raw: &str) -> ParsedPayload {
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut claimed_hash = String::new();
    let mut saw_hash = false;

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let (key, value) = (key.into_owned(), value.into_owned());

        if key == "hash" {
            if !saw_hash {
                claimed_hash = value;
                saw_hash = true;
            }
            continue;
        }

        if fields.iter().any(|(seen, _)| *seen == key) {
            continue;
        }

        fields.push((key, value));
    }

    ParsedPayload {
        fields,
        claimed_hash,
    }
}

/// Build the canonical string the platform signs.
///
/// Each field is formatted as `key=value`, the formatted pairs are sorted
/// byte-wise ascending, and the result is joined with `\n` (no trailing
/// newline). The output depends only on the field map, not on the order
/// fields arrived in.
pub(crate) fn canonical_string(fields: &[(String, String)]) -> String {
    let mut pairs: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    pairs.sort_unstable();
    pairs.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_pairs() {
        let parsed = parse_init_data("auth_date=1700000000&query_id=AAE%2Bzg");
        assert_eq!(parsed.field("auth_date"), Some("1700000000"));
        assert_eq!(parsed.field("query_id"), Some("AAE+zg"));
        assert_eq!(parsed.claimed_hash, "");
    }

    #[test]
    fn test_parse_extracts_hash() {
        let parsed = parse_init_data("a=1&hash=abc123&b=2");
        assert_eq!(parsed.claimed_hash, "abc123");
        assert_eq!(parsed.field("hash"), None);
        assert_eq!(parsed.fields.len(), 2);
    }

    #[test]
    fn test_parse_first_duplicate_wins() {
        let parsed = parse_init_data("a=first&a=second&hash=one&hash=two");
        assert_eq!(parsed.field("a"), Some("first"));
        assert_eq!(parsed.claimed_hash, "one");
    }

    #[test]
    fn test_parse_pair_without_equals() {
        let parsed = parse_init_data("flag&a=1");
        assert_eq!(parsed.field("flag"), Some(""));
        assert_eq!(parsed.field("a"), Some("1"));
    }

    #[test]
    fn test_parse_empty_segments_skipped() {
        let parsed = parse_init_data("a=1&&b=2&");
        assert_eq!(parsed.fields.len(), 2);
    }

    #[test]
    fn test_canonical_sorted_and_joined() {
        let fields = vec![
            ("user".to_string(), "{\"id\":1}".to_string()),
            ("auth_date".to_string(), "1700000000".to_string()),
        ];
        assert_eq!(
            canonical_string(&fields),
            "auth_date=1700000000\nuser={\"id\":1}"
        );
    }

    #[test]
    fn test_canonical_no_trailing_newline() {
        let fields = vec![("a".to_string(), "1".to_string())];
        assert_eq!(canonical_string(&fields), "a=1");
        assert_eq!(canonical_string(&[]), "");
    }

    #[test]
    fn test_canonical_deterministic() {
        let fields = vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ];
        assert_eq!(canonical_string(&fields), canonical_string(&fields));
    }

    #[test]
    fn test_canonical_order_independent() {
        let raw_one = "auth_date=1700000000&query_id=AAE&user=%7B%22id%22%3A1%7D";
        let raw_two = "user=%7B%22id%22%3A1%7D&auth_date=1700000000&query_id=AAE";
        let one = canonical_string(&parse_init_data(raw_one).fields);
        let two = canonical_string(&parse_init_data(raw_two).fields);
        assert_eq!(one, two);
    }

    #[test]
    fn test_canonical_byte_wise_ordering() {
        // "Z" (0x5a) sorts before "a" (0x61) in ordinal order
        let fields = vec![
            ("a".to_string(), "1".to_string()),
            ("Z".to_string(), "2".to_string()),
        ];
        assert_eq!(canonical_string(&fields), "Z=2\na=1");
    }
}
