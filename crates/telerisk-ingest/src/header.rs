use std::collections::BTreeMap;

use csv::ByteRecord;
use telerisk_model::{REGISTER_COLUMNS, REGISTER_COLUMN_COUNT};

use crate::SchemaError;

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// Canonical names in canonical order.
    #[default]
    Exact,
    /// Canonical names, any permutation.
    AnyOrder,
}

impl HeaderPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::AnyOrder => "any_order",
        }
    }
}

/// Canonical column index -> position in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    positions: [usize; REGISTER_COLUMN_COUNT],
}

impl ColumnMap {
    #[must_use]
    pub(crate) fn position(&self, canonical_idx: usize) -> usize {
        self.positions[canonical_idx]
    }
}

pub(crate) fn resolve_header(
    raw: &ByteRecord,
    policy: HeaderPolicy,
) -> Result<ColumnMap, SchemaError> {
    if raw.is_empty() {
        return Err(SchemaError::new("register has no header row"));
    }
    let mut names = Vec::with_capacity(raw.len());
    for (idx, cell) in raw.iter().enumerate() {
        let text = std::str::from_utf8(cell).map_err(|_| {
            SchemaError::new(format!("header cell {} is not valid UTF-8", idx + 1))
        })?;
        let text = if idx == 0 {
            text.trim_start_matches(UTF8_BOM)
        } else {
            text
        };
        names.push(text.trim().to_string());
    }

    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for name in &names {
        *seen.entry(name.as_str()).or_default() += 1;
    }
    let duplicated: Vec<String> = seen
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(name, _)| (*name).to_string())
        .collect();
    let missing: Vec<String> = REGISTER_COLUMNS
        .iter()
        .filter(|c| !seen.contains_key(**c))
        .map(|c| (*c).to_string())
        .collect();
    let unexpected: Vec<String> = names
        .iter()
        .filter(|n| !REGISTER_COLUMNS.contains(&n.as_str()))
        .cloned()
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() || !duplicated.is_empty() {
        let mut parts = vec![format!(
            "expected {REGISTER_COLUMN_COUNT} columns, found {}",
            names.len()
        )];
        if !missing.is_empty() {
            parts.push(format!("missing [{}]", missing.join(", ")));
        }
        if !unexpected.is_empty() {
            parts.push(format!("unexpected [{}]", unexpected.join(", ")));
        }
        if !duplicated.is_empty() {
            parts.push(format!("duplicated [{}]", duplicated.join(", ")));
        }
        return Err(SchemaError {
            message: format!("header mismatch: {}", parts.join("; ")),
            missing,
            unexpected,
            duplicated,
        });
    }

    let mut positions = [0_usize; REGISTER_COLUMN_COUNT];
    for (canonical_idx, column) in REGISTER_COLUMNS.iter().enumerate() {
        // Presence and uniqueness were checked above.
        let found = names.iter().position(|n| n == column).unwrap_or(canonical_idx);
        if policy == HeaderPolicy::Exact && found != canonical_idx {
            return Err(SchemaError::new(format!(
                "header columns out of order: expected `{column}` at position {}, found `{}`",
                canonical_idx + 1,
                names[canonical_idx]
            )));
        }
        positions[canonical_idx] = found;
    }
    Ok(ColumnMap { positions })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> ByteRecord {
        ByteRecord::from(names.to_vec())
    }

    #[test]
    fn canonical_header_maps_identity() {
        let map = resolve_header(&header(&REGISTER_COLUMNS), HeaderPolicy::Exact)
            .expect("canonical header");
        for idx in 0..REGISTER_COLUMN_COUNT {
            assert_eq!(map.position(idx), idx);
        }
    }

    #[test]
    fn bom_and_padding_are_ignored() {
        let mut names: Vec<String> = REGISTER_COLUMNS.iter().map(|c| format!(" {c} ")).collect();
        names[0] = format!("{UTF8_BOM}Risk_ID");
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        assert!(resolve_header(&header(&refs), HeaderPolicy::Exact).is_ok());
    }

    #[test]
    fn swapped_columns_depend_on_policy() {
        let mut names = REGISTER_COLUMNS.to_vec();
        names.swap(0, 2);
        let err = resolve_header(&header(&names), HeaderPolicy::Exact).expect_err("exact");
        assert!(err.message.contains("out of order"), "{}", err.message);

        let map = resolve_header(&header(&names), HeaderPolicy::AnyOrder).expect("any order");
        assert_eq!(map.position(0), 2);
        assert_eq!(map.position(2), 0);
    }

    #[test]
    fn mismatch_lists_missing_unexpected_and_duplicated() {
        let mut names = REGISTER_COLUMNS.to_vec();
        names[3] = "Delivery_Model";
        names[26] = "Risk_ID";
        let err = resolve_header(&header(&names), HeaderPolicy::AnyOrder).expect_err("mismatch");
        assert_eq!(err.missing, vec!["Methodology".to_string(), "Notes".to_string()]);
        assert_eq!(err.unexpected, vec!["Delivery_Model".to_string()]);
        assert_eq!(err.duplicated, vec!["Risk_ID".to_string()]);
    }

    #[test]
    fn empty_header_is_a_schema_error() {
        let err = resolve_header(&ByteRecord::new(), HeaderPolicy::Exact).expect_err("empty");
        assert!(err.message.contains("no header"));
    }
}
