// tests/metadata/provider_test.rs
use async_trait::async_trait;
use erdai::metadata::{
    extract_metadata, extract_schemas, CatalogProvider, ColumnRow, FkRow, ProviderError,
    ProviderResult, StaticCatalog,
};

fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_schema(
            "shop",
            vec![
                ColumnRow::new("orders", 1, "id").primary_key(),
                ColumnRow::new("orders", 2, "customer_id"),
                ColumnRow::new("customers", 1, "id").primary_key(),
            ],
            vec![
                FkRow::new("orders", "customer_id", "customers", "id"),
                FkRow::new("invoices", "order_id", "orders", "id"),
            ],
        )
        .with_schema("hr", vec![ColumnRow::new("r_employee", 1, "emp_no")], vec![])
}

#[tokio::test]
async fn test_extract_metadata_normalizes_rows() {
    let normalized = extract_metadata(&catalog(), "shop").await.unwrap();

    assert_eq!(normalized.metadata.schema_name, "shop");
    assert_eq!(normalized.metadata.table_count, 2);
    assert_eq!(normalized.metadata.fk_count, 2);
    assert_eq!(normalized.diagnostics.len(), 1);
}

#[tokio::test]
async fn test_extract_unknown_schema() {
    let err = extract_metadata(&catalog(), "missing").await.unwrap_err();
    assert!(matches!(err, ProviderError::SchemaNotFound(ref s) if s == "missing"));
}

#[tokio::test]
async fn test_extract_schemas_keeps_order() {
    let schemas = vec!["hr".to_string(), "missing".to_string(), "shop".to_string()];
    let results = extract_schemas(&catalog(), &schemas).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().metadata.schema_name, "hr");
    assert_eq!(results[0].as_ref().unwrap().metadata.tables[0].domain, "R");
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().metadata.schema_name, "shop");
}

/// Provider whose FK query always fails.
struct BrokenFks;

#[async_trait]
impl CatalogProvider for BrokenFks {
    async fn column_rows(&self, _schema: &str) -> ProviderResult<Vec<ColumnRow>> {
        Ok(vec![ColumnRow::new("orders", 1, "id")])
    }

    async fn fk_rows(&self, schema: &str) -> ProviderResult<Vec<FkRow>> {
        Err(ProviderError::fetch(schema, "foreign keys", "permission denied"))
    }
}

#[tokio::test]
async fn test_fetch_error_propagates() {
    let err = extract_metadata(&BrokenFks, "shop").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to fetch foreign keys for schema 'shop': permission denied"
    );
}

/// Provider returning a row without a table name.
struct Malformed;

#[async_trait]
impl CatalogProvider for Malformed {
    async fn column_rows(&self, _schema: &str) -> ProviderResult<Vec<ColumnRow>> {
        Ok(vec![ColumnRow::new("", 1, "id")])
    }

    async fn fk_rows(&self, _schema: &str) -> ProviderResult<Vec<FkRow>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn test_malformed_rows_surface_as_metadata_error() {
    let err = extract_metadata(&Malformed, "shop").await.unwrap_err();
    assert!(matches!(err, ProviderError::Metadata(_)));
    assert!(err.to_string().contains("table_name"));
}

#[tokio::test]
async fn test_provider_as_trait_object() {
    let provider: Box<dyn CatalogProvider> = Box::new(catalog());
    let normalized = extract_metadata(provider.as_ref(), "hr").await.unwrap();
    assert_eq!(normalized.metadata.column_count, 1);
}
