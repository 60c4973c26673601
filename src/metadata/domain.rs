//! Domain classification from table naming prefixes.
//!
//! Tables in catalog-heavy schemas usually carry a short prefix that names the
//! business area (`r_indicatorinfo`, `st_tr_sales`). The tag is a grouping
//! label for downstream consumers and has no effect on inference.

/// Domain tag for tables without a recognizable prefix.
pub const UNCLASSIFIED: &str = "ETC";

/// Maximum length of a segment that still counts as part of a compound prefix.
const COMPOUND_SEGMENT_MAX: usize = 4;

/// Classify a table into a domain tag based on its name prefix.
///
/// - `st_tr_sales` -> `ST_TR` (two short leading segments form a compound prefix)
/// - `r_indicatorinfo` -> `R`
/// - `orders` -> `ETC`
pub fn classify(table_name: &str) -> String {
    let lower = table_name.to_lowercase();
    let parts: Vec<&str> = lower.split('_').collect();

    if parts.len() >= 3
        && parts[0].chars().count() <= COMPOUND_SEGMENT_MAX
        && parts[1].chars().count() <= COMPOUND_SEGMENT_MAX
    {
        return format!("{}_{}", parts[0], parts[1]).to_uppercase();
    }

    if parts.len() >= 2 {
        return parts[0].to_uppercase();
    }

    UNCLASSIFIED.to_string()
}
