use crate::types::NodeId;
use serde_json::Value;

/// Extracts the `neighbors` list from a lookup response.
///
/// Anything other than an object with a `neighbors` array yields an empty list, and
/// non-string entries inside the array are skipped. Duplicates are kept; admission
/// against the visited set happens in the worker.
pub fn decode_neighbors(raw: &str) -> Vec<NodeId> {
    let Ok(doc) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };

    match doc.get("neighbors") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_ordered_neighbors() {
        let raw = r#"{"node":"Kevin Bacon","neighbors":["Footloose","Tremors","Apollo 13"]}"#;
        assert_eq!(
            decode_neighbors(raw),
            vec!["Footloose", "Tremors", "Apollo 13"]
        );
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let raw = r#"{"neighbors":["B","A","B"]}"#;
        assert_eq!(decode_neighbors(raw), vec!["B", "A", "B"]);
    }

    #[test]
    fn malformed_payloads_decode_to_empty() {
        for raw in [
            "",
            "   ",
            "{}",
            "{",
            "null",
            "[\"A\",\"B\"]",
            "\"neighbors\"",
            r#"{"neighbors":"A"}"#,
            r#"{"neighbors":null}"#,
            r#"{"neighbours":["A"]}"#,
            "<html>502 Bad Gateway</html>",
        ] {
            assert!(decode_neighbors(raw).is_empty(), "expected empty for {raw:?}");
        }
    }

    #[test]
    fn skips_non_string_entries() {
        let raw = r#"{"neighbors":["A",1,null,{"x":1},"B",["C"]]}"#;
        assert_eq!(decode_neighbors(raw), vec!["A", "B"]);
    }

    #[test]
    fn decoding_is_repeatable() {
        let raw = r#"{"neighbors":["X","Y"]}"#;
        assert_eq!(decode_neighbors(raw), decode_neighbors(raw));
    }
}
