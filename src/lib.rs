//! # erdai
//!
//! Normalizes relational catalog rows into a schema model and infers entity
//! relationships from declared constraints and naming conventions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Raw catalog rows (per-backend collaborators)      │
//! │            ColumnRow[]            FkRow[]                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata::normalize]
//! ┌─────────────────────────────────────────────────────────┐
//! │                   SchemaMetadata                         │
//! │   tables -> columns, pk_columns, fk_refs, domain         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [inference::infer]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Vec<InferredRelation> (scored, deduplicated)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [erd::build_erd]
//! ┌─────────────────────────────────────────────────────────┐
//! │                      ErdGraph                            │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod erd;
pub mod inference;
pub mod metadata;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::erd::{build_erd, ErdColumn, ErdGraph, ErdTable};
    pub use crate::inference::{
        infer, Cardinality, Confidence, InferenceConfig, InferenceEngine, InferredRelation,
    };
    pub use crate::metadata::{
        classify, extract_metadata, normalize, CatalogProvider, ColumnMeta, ColumnRow,
        Diagnostic, FkMeta, FkRow, MetadataError, Normalized, SchemaMetadata, TableMeta,
    };
}

pub use inference::{infer, InferredRelation};
pub use metadata::{normalize, SchemaMetadata};
