use std::str::FromStr;

use hashbrown::HashMap;
use log::debug;

const QUOTE: char = '"';
const MULTI_VALUE_SEPARATOR: char = ',';

/// Attributes of a single GTF line, parsed from the ninth column.
///
/// Keys keep the order in which they were first met on the line. Repeated
/// keys (`tag "basic"; tag "CCDS";`) are folded into one comma-joined value.
///
/// Parsing never fails: malformed segments are salvaged where possible and
/// skipped otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeEntry {
    keys:   Vec<String>,
    values: HashMap<String, String>,
}

impl AttributeEntry {
    /// Parses a raw attribute field. `"."` and whitespace-only fields yield
    /// an empty entry.
    pub fn parse(raw: &str) -> Self {
        let mut entry = AttributeEntry::default();
        let raw = raw.trim();
        if raw.is_empty() || raw == "." {
            return entry;
        }

        for segment in raw.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match split_segment(segment) {
                Some((key, value)) => entry.insert(key, value),
                None => debug!("Dropping attribute segment '{}'", segment),
            }
        }
        entry
    }

    /// Adds a value, joining it onto any existing value for the same key.
    pub fn insert(
        &mut self,
        key: &str,
        value: &str,
    ) {
        match self.values.get_mut(key) {
            Some(existing) => {
                existing.push(MULTI_VALUE_SEPARATOR);
                existing.push_str(value);
            },
            None => {
                self.keys.push(key.to_string());
                self.values
                    .insert(key.to_string(), value.to_string());
            },
        }
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Removes the value for `key`, leaving the key order untouched.
    pub(crate) fn take(
        &mut self,
        key: &str,
    ) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }
}

impl FromStr for AttributeEntry {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(AttributeEntry::parse(s)) }
}

/// Splits one `key "value"` segment. Returns `None` when no key/value pair
/// can be salvaged.
fn split_segment(segment: &str) -> Option<(&str, &str)> {
    let (key, value) = match segment.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => {
            // `key"value"`
            let (key, value) = segment.split_once(QUOTE)?;
            if strip_quotes(value).is_empty() {
                // Tail of a quoted value split on `;`, e.g. `y"`.
                return None;
            }
            debug!("Attribute segment '{}' has no separating whitespace", segment);
            (key, value)
        },
    };
    if key.is_empty() {
        return None;
    }
    Some((key, strip_quotes(value)))
}

/// Strips one leading and one trailing quote, independently of each other.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(QUOTE).unwrap_or(value);
    value.strip_suffix(QUOTE).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_pairs_in_order() {
        let entry = AttributeEntry::parse(
            r#"gene_id "ENSG00000223972"; gene_name "DDX11L1"; gene_source "havana";"#,
        );
        assert_eq!(
            entry.keys().collect::<Vec<_>>(),
            ["gene_id", "gene_name", "gene_source"]
        );
        assert_eq!(entry.get("gene_id"), Some("ENSG00000223972"));
        assert_eq!(entry.get("gene_source"), Some("havana"));
        assert_eq!(entry.get("transcript_id"), None);
    }

    #[test]
    fn tolerates_missing_trailing_semicolon_and_extra_space() {
        let entry = AttributeEntry::parse(r#"  gene_id  "A" ;;transcript_id "B""#);
        assert_eq!(entry.len(), 2);
        assert_eq!(entry.get("gene_id"), Some("A"));
        assert_eq!(entry.get("transcript_id"), Some("B"));
    }

    #[test]
    fn keeps_values_with_inner_spaces() {
        let entry = AttributeEntry::parse(
            r#"transcript_support_level "1 (assigned to previous version 5)";"#,
        );
        assert_eq!(
            entry.get("transcript_support_level"),
            Some("1 (assigned to previous version 5)")
        );
    }

    #[test]
    fn unquoted_and_unbalanced_values_are_salvaged() {
        let entry = AttributeEntry::parse(r#"exon_number 3; gene_id "A; level 2""#);
        assert_eq!(entry.get("exon_number"), Some("3"));
        assert_eq!(entry.get("gene_id"), Some("A"));
        assert_eq!(entry.get("level"), Some("2"));
    }

    #[test]
    fn segment_without_whitespace_splits_on_quote() {
        let entry = AttributeEntry::parse(r#"gene_id"A";orphan; gene_name "B";"#);
        assert_eq!(entry.keys().collect::<Vec<_>>(), ["gene_id", "gene_name"]);
        assert_eq!(entry.get("gene_id"), Some("A"));
    }

    #[test]
    fn semicolon_inside_quotes_leaves_no_stray_key() {
        let entry = AttributeEntry::parse(r#"gene_id "A"; note "x; y"; gene_name "B";"#);
        assert_eq!(entry.keys().collect::<Vec<_>>(), ["gene_id", "note", "gene_name"]);
        assert_eq!(entry.get("note"), Some("x"));
        assert_eq!(entry.get("y"), None);
    }

    #[test]
    fn repeated_keys_are_joined() {
        let entry = AttributeEntry::parse(r#"tag "basic"; gene_id "A"; tag "CCDS";"#);
        assert_eq!(entry.keys().collect::<Vec<_>>(), ["tag", "gene_id"]);
        assert_eq!(entry.get("tag"), Some("basic,CCDS"));
    }

    #[test]
    fn empty_and_dot_fields_have_no_keys() {
        assert!(AttributeEntry::parse("").is_empty());
        assert!(AttributeEntry::parse("   ").is_empty());
        assert!(AttributeEntry::parse(".").is_empty());
        assert!(AttributeEntry::parse(";;").is_empty());
    }
}
