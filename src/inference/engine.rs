//! Relationship inference engine.
//!
//! The engine runs its passes in a fixed order over tables (already sorted by
//! name) and columns (ordinal order). Deduplication is first-write-wins, so
//! the pass order is part of the output contract.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::metadata::{ColumnMeta, SchemaMetadata, TableMeta};

use super::rules::{candidate_tables, default_rules, NamingRule};
use super::thresholds::{score, COMMENT_BOOST};
use super::{InferredRelation, RelationKey};

const FK_REASON: &str = "FK constraint";
const COMMENT_REASON: &str = "column comment match";
const PK_MATCH_REASON: &str = "PK column name direct match";

/// Configuration for the inference engine.
///
/// Each flag enables one pass. Disabled passes are skipped; the remaining
/// passes keep their relative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Emit relations for declared foreign keys.
    pub explicit_foreign_keys: bool,
    /// Apply the `_id` / `_cd` / `_code` / `_no` naming rules.
    pub naming_conventions: bool,
    /// Match columns named like another table's primary key.
    pub primary_key_names: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            explicit_foreign_keys: true,
            naming_conventions: true,
            primary_key_names: true,
        }
    }
}

impl InferenceConfig {
    /// Only declared foreign keys, no heuristics.
    pub fn declared_only() -> Self {
        Self {
            explicit_foreign_keys: true,
            naming_conventions: false,
            primary_key_names: false,
        }
    }
}

/// Ordered, deduplicated accumulation of relations.
#[derive(Debug, Default)]
struct RelationSet {
    seen: HashSet<RelationKey>,
    relations: Vec<InferredRelation>,
}

impl RelationSet {
    /// Append unless an identical key was already added.
    fn add(&mut self, rel: InferredRelation) {
        if self.seen.insert(rel.key()) {
            self.relations.push(rel);
        }
    }

    fn into_vec(self) -> Vec<InferredRelation> {
        self.relations
    }
}

/// Lookup structures built once per schema.
#[derive(Debug, Default)]
struct TableLookup {
    /// Lower-cased table names
    names: HashSet<String>,
    /// Lower-cased table name -> lower-cased comment
    comments: HashMap<String, String>,
}

impl TableLookup {
    fn from_tables(tables: &[TableMeta]) -> Self {
        let mut lookup = Self::default();
        for table in tables {
            let name_lower = table.name.to_lowercase();
            lookup.names.insert(name_lower.clone());
            lookup
                .comments
                .insert(name_lower, table.comment.to_lowercase());
        }
        lookup
    }

    /// Whether the column comment mentions the candidate table by name or comment.
    fn comment_mentions(&self, candidate: &str, col_comment_lower: &str) -> bool {
        if col_comment_lower.contains(candidate) {
            return true;
        }
        match self.comments.get(candidate) {
            Some(t_comment) => !t_comment.is_empty() && col_comment_lower.contains(t_comment.as_str()),
            None => false,
        }
    }
}

/// The relationship inference engine.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    config: InferenceConfig,
    rules: Vec<NamingRule>,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(InferenceConfig::default())
    }
}

impl InferenceEngine {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
        }
    }

    /// Infer relationships for a schema.
    ///
    /// Never fails; a schema without FKs or recognizable names yields an
    /// empty list.
    pub fn infer(&self, metadata: &SchemaMetadata) -> Vec<InferredRelation> {
        let mut set = RelationSet::default();

        if self.config.explicit_foreign_keys {
            self.declared_foreign_keys(metadata, &mut set);
        }
        if self.config.naming_conventions {
            let lookup = TableLookup::from_tables(&metadata.tables);
            self.naming_conventions(metadata, &lookup, &mut set);
        }
        if self.config.primary_key_names {
            self.primary_key_names(metadata, &mut set);
        }

        let relations = set.into_vec();
        debug!(
            schema = %metadata.schema_name,
            relations = relations.len(),
            "inferred relations"
        );
        relations
    }

    fn declared_foreign_keys(&self, metadata: &SchemaMetadata, set: &mut RelationSet) {
        for table in &metadata.tables {
            for fk in &table.fk_refs {
                set.add(InferredRelation::scored(
                    (table.name.as_str(), fk.column_name.as_str()),
                    (fk.ref_table.as_str(), fk.ref_column.as_str()),
                    score::DECLARED_FK,
                    FK_REASON,
                    format!(
                        "{}.{} -> {}.{}",
                        table.name, fk.column_name, fk.ref_table, fk.ref_column
                    ),
                ));
            }
        }
    }

    fn naming_conventions(
        &self,
        metadata: &SchemaMetadata,
        lookup: &TableLookup,
        set: &mut RelationSet,
    ) {
        for table in &metadata.tables {
            for column in &table.columns {
                let col_lower = column.name.to_lowercase();
                for rule in &self.rules {
                    let Some(base) = rule.base_name(&col_lower) else {
                        continue;
                    };
                    for candidate in candidate_tables(&lookup.names, &base) {
                        trace!(
                            rule = rule.name,
                            table = %table.name,
                            column = %column.name,
                            candidate = %candidate,
                            "naming rule matched"
                        );
                        set.add(self.naming_relation(table, column, rule, &candidate, lookup));
                    }
                }
            }
        }
    }

    fn naming_relation(
        &self,
        table: &TableMeta,
        column: &ColumnMeta,
        rule: &NamingRule,
        candidate: &str,
        lookup: &TableLookup,
    ) -> InferredRelation {
        let mut score = rule.base_score;
        let mut reason = vec![rule.description.to_string()];
        let mut evidence = vec![format!(
            "{}.{} -> {}.{}",
            table.name, column.name, candidate, rule.target_column
        )];

        if lookup.comment_mentions(candidate, &column.comment.to_lowercase()) {
            score += COMMENT_BOOST;
            reason.push(COMMENT_REASON.to_string());
            evidence.push(format!("comment: {}", column.comment));
        }

        InferredRelation::scored(
            (table.name.as_str(), column.name.as_str()),
            (candidate, rule.target_column),
            score,
            reason.join(" + "),
            evidence.join("; "),
        )
    }

    fn primary_key_names(&self, metadata: &SchemaMetadata, set: &mut RelationSet) {
        for table in &metadata.tables {
            for pk in &table.pk_columns {
                let pk_lower = pk.to_lowercase();
                for other in &metadata.tables {
                    if other.name == table.name {
                        continue;
                    }
                    for column in &other.columns {
                        if column.name.to_lowercase() != pk_lower {
                            continue;
                        }
                        set.add(InferredRelation::scored(
                            (other.name.as_str(), column.name.as_str()),
                            (table.name.as_str(), pk.as_str()),
                            score::PK_NAME_MATCH,
                            PK_MATCH_REASON,
                            format!("{}.{} == {}.{}", other.name, column.name, table.name, pk),
                        ));
                    }
                }
            }
        }
    }
}

/// Infer relationships with the default configuration.
pub fn infer(metadata: &SchemaMetadata) -> Vec<InferredRelation> {
    InferenceEngine::default().infer(metadata)
}
