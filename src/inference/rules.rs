//! Naming-convention rules for relationship discovery.
//!
//! Each rule recognizes a column-name suffix, derives the base name of the
//! table the column probably points at, and names the target column.

use std::collections::HashSet;

use super::thresholds::score;

/// A suffix rule that maps a column name to candidate target tables.
#[derive(Debug, Clone)]
pub struct NamingRule {
    /// Rule identifier
    pub name: &'static str,
    /// Human-readable description used in relation reasons
    pub description: &'static str,
    /// Column the relation points at on the target table
    pub target_column: &'static str,
    /// Score for a match before comment hints
    pub base_score: f64,
    matcher: SuffixMatcher,
}

/// The type of suffix logic for a rule.
#[derive(Debug, Clone, Copy)]
enum SuffixMatcher {
    /// `customer_id` -> `customer`
    Id,
    /// `status_cd` / `status_code` -> `status`
    Code,
    /// `order_no` -> `order`
    No,
}

impl NamingRule {
    /// Derive the base table name from a lower-cased column name.
    ///
    /// Returns `None` when the rule does not apply to the column.
    pub fn base_name(&self, col_lower: &str) -> Option<String> {
        match self.matcher {
            SuffixMatcher::Id => col_lower.strip_suffix("_id").map(str::to_string),
            SuffixMatcher::Code => {
                if col_lower.ends_with("_cd") || col_lower.ends_with("_code") {
                    // Every occurrence is removed, not only the suffix.
                    Some(col_lower.replace("_code", "").replace("_cd", ""))
                } else {
                    None
                }
            }
            SuffixMatcher::No => col_lower.strip_suffix("_no").map(str::to_string),
        }
    }
}

/// Returns the naming rules in evaluation order.
pub fn default_rules() -> Vec<NamingRule> {
    vec![
        NamingRule {
            name: "suffix_id",
            description: "column name _id rule",
            target_column: "id",
            base_score: score::SUFFIX_ID,
            matcher: SuffixMatcher::Id,
        },
        NamingRule {
            name: "suffix_code",
            description: "column name _cd/_code rule",
            target_column: "code",
            base_score: score::SUFFIX_CODE,
            matcher: SuffixMatcher::Code,
        },
        NamingRule {
            name: "suffix_no",
            description: "column name _no rule",
            target_column: "no",
            base_score: score::SUFFIX_NO,
            matcher: SuffixMatcher::No,
        },
    ]
}

/// Resolve candidate target tables for a base name.
///
/// Tries `base`, `base + "s"` and `base` with trailing `s` characters removed,
/// in that order, keeping those present in `table_names` (lower-cased).
/// The same table can appear more than once.
pub fn candidate_tables(table_names: &HashSet<String>, base: &str) -> Vec<String> {
    let candidates = [
        base.to_string(),
        format!("{}s", base),
        base.trim_end_matches('s').to_string(),
    ];

    candidates
        .into_iter()
        .filter(|c| table_names.contains(c))
        .collect()
}
