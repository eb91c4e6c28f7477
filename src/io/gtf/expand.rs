use hashbrown::HashSet;
use indexmap::IndexSet;
use log::{
    debug,
    warn,
};

use crate::data_structs::{
    AttributeEntry,
    ExpandedAttributes,
};
use crate::schema::GtfColumns;

/// Suffix appended to an attribute key which clashes with a fixed column.
const RENAMED_KEY_SUFFIX: &str = "_attribute";

/// Turns the attribute fields of all rows into one column per key.
///
/// Columns appear in the order their key is first met while scanning rows.
/// A row without a given key holds the missing value (by default `""`) in
/// that column.
#[derive(Debug, Clone)]
pub struct AttributeExpander {
    missing_value: String,
    restrict_to:   Option<HashSet<String>>,
}

impl Default for AttributeExpander {
    fn default() -> Self {
        Self {
            missing_value: String::new(),
            restrict_to:   None,
        }
    }
}

impl AttributeExpander {
    pub fn with_missing_value<S: Into<String>>(
        mut self,
        missing_value: S,
    ) -> Self {
        self.missing_value = missing_value.into();
        self
    }

    /// Only expand the listed keys. Other keys are dropped.
    pub fn with_restrict_to<I, S>(
        mut self,
        keys: Option<I>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>, {
        self.restrict_to = keys.map(|keys| keys.into_iter().map(Into::into).collect());
        self
    }

    fn keep(
        &self,
        key: &str,
    ) -> bool {
        self.restrict_to
            .as_ref()
            .map(|keys| keys.contains(key))
            .unwrap_or(true)
    }

    pub fn expand<S: AsRef<str>>(
        &self,
        attributes: &[S],
    ) -> ExpandedAttributes {
        // First pass: per-row entries and the global key order.
        let mut key_order: IndexSet<String> = IndexSet::new();
        let mut entries = Vec::with_capacity(attributes.len());
        for raw in attributes {
            let entry = AttributeEntry::parse(raw.as_ref());
            for key in entry.keys() {
                if self.keep(key) && !key_order.contains(key) {
                    key_order.insert(key.to_string());
                }
            }
            entries.push(entry);
        }

        // Second pass: one column per key, backfilled with the missing value.
        let columns = key_order
            .iter()
            .map(|key| {
                entries
                    .iter_mut()
                    .map(|entry| {
                        entry
                            .take(key)
                            .unwrap_or_else(|| self.missing_value.clone())
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let names = dedup_fixed_names(key_order);
        debug!(
            "Expanded attributes of {} rows into {} columns",
            attributes.len(),
            names.len()
        );

        ExpandedAttributes { names, columns }
    }
}

/// Renames keys equal to a fixed column name so they cannot replace or
/// duplicate it.
fn dedup_fixed_names(key_order: IndexSet<String>) -> Vec<String> {
    let mut taken: HashSet<String> = key_order.iter().cloned().collect();
    key_order
        .into_iter()
        .map(|key| {
            if !GtfColumns::is_fixed_name(&key) {
                return key;
            }
            let mut renamed = format!("{key}{RENAMED_KEY_SUFFIX}");
            while taken.contains(&renamed) || GtfColumns::is_fixed_name(&renamed) {
                renamed.push_str(RENAMED_KEY_SUFFIX);
            }
            warn!(
                "Attribute key '{}' clashes with a fixed column, renamed to '{}'",
                key, renamed
            );
            taken.insert(renamed.clone());
            renamed
        })
        .collect()
}
