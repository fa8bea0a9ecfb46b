//! Label-then-next-line scanning for scalar fields.

use std::collections::HashMap;

use tracing::trace;

use crate::models::fields::{FieldRegistry, ScalarValues};

/// Scan page texts for the registry's labels.
///
/// A line equal to a label (after trimming) marks the following line as that
/// label's value. Each label is used once per document: the first
/// occurrence wins and later repeats are ignored. The value line is taken
/// as-is, even when it is empty or itself looks like a label. A label on
/// the last line of a page without a trailing newline pairs with the first
/// line of the next page.
pub fn scan_key_values<S: AsRef<str>>(pages: &[S], registry: &FieldRegistry) -> ScalarValues {
    let mut values = registry.empty_values();
    let mut pending_labels: HashMap<&str, &str> = registry
        .items()
        .iter()
        .map(|item| (item.label(), item.key()))
        .collect();
    let mut pending: Option<&str> = None;

    for page in pages {
        // A trailing newline leaves an empty last line, which can be a value.
        for line in page.as_ref().split('\n') {
            let line = line.trim();

            if let Some(label) = pending.take() {
                if let Some(key) = pending_labels.remove(label) {
                    trace!("{} = {:?}", key, line);
                    let stored = values.set(key, line).is_ok();
                    debug_assert!(stored, "registry key {key} missing from its own values");
                }
                continue;
            }

            if pending_labels.contains_key(line) {
                pending = Some(line);
            }
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldItem;
    use pretty_assertions::assert_eq;

    fn registry() -> FieldRegistry {
        FieldRegistry::from_items([
            FieldItem::text("gross-weight", "Gross Weight").unwrap(),
            FieldItem::text("comm-inv-no", "Comm Inv No").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_scan_values() {
        let pages = ["Invoice\n  Comm Inv No \nCI-1001-7\nGross Weight\n12.5 KG\n"];
        let values = scan_key_values(&pages, &registry());

        assert_eq!(values.get("comm-inv-no"), Some("CI-1001-7"));
        assert_eq!(values.get("gross-weight"), Some("12.5 KG"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let pages = [
            "Comm Inv No\nCI-1\n".to_string(),
            "Comm Inv No\nCI-2\n".to_string(),
        ];
        let values = scan_key_values(&pages, &registry());

        assert_eq!(values.get("comm-inv-no"), Some("CI-1"));
    }

    #[test]
    fn test_missing_label_stays_null() {
        let values = scan_key_values(&["Comm Inv No\nCI-1"], &registry());

        assert_eq!(values.get("gross-weight"), None);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_value_on_next_page() {
        let values = scan_key_values(&["Header\nGross Weight", "40 KG\nFooter"], &registry());

        assert_eq!(values.get("gross-weight"), Some("40 KG"));
    }

    #[test]
    fn test_trailing_newline_gives_empty_value() {
        let values = scan_key_values(&["Header\nGross Weight\n", "40 KG\nFooter"], &registry());

        assert_eq!(values.get("gross-weight"), Some(""));
    }

    #[test]
    fn test_value_line_is_not_a_label() {
        let values = scan_key_values(&["Gross Weight\nComm Inv No\nCI-9"], &registry());

        assert_eq!(values.get("gross-weight"), Some("Comm Inv No"));
        assert_eq!(values.get("comm-inv-no"), None);
    }

    #[test]
    fn test_label_must_fill_line() {
        let values = scan_key_values(&["Gross Weight: 40 KG\nnext"], &registry());

        assert_eq!(values.get("gross-weight"), None);
    }

    #[test]
    fn test_fresh_values_per_scan() {
        let registry = registry();
        let first = scan_key_values(&["Comm Inv No\nCI-1"], &registry);
        let second = scan_key_values(&["nothing here"], &registry);

        assert_eq!(first.get("comm-inv-no"), Some("CI-1"));
        assert_eq!(second.get("comm-inv-no"), None);
    }
}
