//! Relationship inference over a normalized schema.
//!
//! Relationships are proposed by three passes that run in a fixed order:
//!
//! 1. **Declared foreign keys** - every attached FK becomes an `FK` relation
//! 2. **Naming conventions** - `_id`, `_cd`/`_code` and `_no` suffixes resolve
//!    to tables named after the column, boosted by comment hints
//! 3. **Primary-key name equality** - columns sharing another table's PK name
//!
//! Every proposal carries a numeric score; its [`Confidence`] tier is derived
//! from that score and never set on its own. Proposals are deduplicated on
//! [`RelationKey`], first write wins, and output keeps insertion order.
//!
//! # Example
//!
//! ```ignore
//! use erdai::inference::{infer, Confidence};
//!
//! let relations = infer(&metadata);
//! let strong: Vec<_> = relations
//!     .iter()
//!     .filter(|r| r.confidence >= Confidence::High)
//!     .collect();
//! ```

mod engine;
pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use engine::{infer, InferenceConfig, InferenceEngine};
pub use rules::{candidate_tables, default_rules, NamingRule};

/// Centralized score thresholds and adjustments.
pub mod thresholds {
    /// Lower bounds of the confidence tiers (inclusive).
    pub mod tier {
        pub const FK: f64 = 0.90;
        pub const HIGH: f64 = 0.75;
        pub const MEDIUM: f64 = 0.55;
    }

    /// Scores assigned by each pass.
    pub mod score {
        /// Declared foreign-key constraint.
        pub const DECLARED_FK: f64 = 1.0;
        /// `_id` suffix rule.
        pub const SUFFIX_ID: f64 = 0.80;
        /// `_cd` / `_code` suffix rule.
        pub const SUFFIX_CODE: f64 = 0.60;
        /// `_no` suffix rule.
        pub const SUFFIX_NO: f64 = 0.45;
        /// Column name equals another table's primary key.
        pub const PK_NAME_MATCH: f64 = 0.55;
    }

    /// Added when the column comment names the candidate table.
    pub const COMMENT_BOOST: f64 = 0.10;
}

/// Discretized trust level of a relationship.
///
/// Ordered from weakest to strongest so tiers can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
    /// Declared constraint, or heuristics strong enough to be treated as one.
    Fk,
}

impl Confidence {
    /// Bucket a score into a tier. Bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= thresholds::tier::FK {
            Confidence::Fk
        } else if score >= thresholds::tier::HIGH {
            Confidence::High
        } else if score >= thresholds::tier::MEDIUM {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Fk => "FK",
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claimed multiplicity of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "1:N")]
    OneToMany,
    #[serde(rename = "N:1")]
    ManyToOne,
    #[serde(rename = "N:M")]
    ManyToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::OneToOne => write!(f, "1:1"),
            Cardinality::OneToMany => write!(f, "1:N"),
            Cardinality::ManyToOne => write!(f, "N:1"),
            Cardinality::ManyToMany => write!(f, "N:M"),
        }
    }
}

/// A proposed relationship between two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredRelation {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub confidence: Confidence,
    pub cardinality: Cardinality,
    /// Human-readable description of the rule(s) that fired
    #[serde(default)]
    pub reason: Option<String>,
    /// Evidence trail justifying the proposal
    #[serde(default)]
    pub evidence: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl InferredRelation {
    /// Create a many-to-one relation whose tier is derived from `score`.
    pub fn scored(
        source: (&str, &str),
        target: (&str, &str),
        score: f64,
        reason: impl Into<String>,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            source_table: source.0.to_string(),
            source_column: source.1.to_string(),
            target_table: target.0.to_string(),
            target_column: target.1.to_string(),
            confidence: Confidence::from_score(score),
            cardinality: Cardinality::ManyToOne,
            reason: Some(reason.into()),
            evidence: Some(evidence.into()),
            score: Some(score),
        }
    }

    /// The deduplication key of this relation.
    pub fn key(&self) -> RelationKey {
        RelationKey::from_relation(self)
    }
}

impl fmt::Display for InferredRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{} [{} {}",
            self.source_table,
            self.source_column,
            self.target_table,
            self.target_column,
            self.confidence,
            self.cardinality
        )?;
        if let Some(score) = self.score {
            write!(f, " {:.2}", score)?;
        }
        write!(f, "]")
    }
}

/// Deduplication key: both endpoints plus the confidence tier.
///
/// Names are compared exactly as produced by the passes. Two relations with
/// the same endpoints but different tiers have different keys.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RelationKey {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub confidence: Confidence,
}

impl RelationKey {
    #[must_use]
    pub fn from_relation(rel: &InferredRelation) -> Self {
        Self {
            source_table: rel.source_table.clone(),
            source_column: rel.source_column.clone(),
            target_table: rel.target_table.clone(),
            target_column: rel.target_column.clone(),
            confidence: rel.confidence,
        }
    }
}
