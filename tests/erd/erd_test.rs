// tests/erd/erd_test.rs
use erdai::erd::build_erd;
use erdai::inference::infer;
use erdai::metadata::{normalize, ColumnRow, FkRow};

#[test]
fn test_build_erd_flags_declared_fk_columns() {
    let normalized = normalize(
        "shop",
        &[
            ColumnRow::new("customers", 1, "id").with_type("int").primary_key(),
            ColumnRow::new("orders", 1, "id").with_type("int").primary_key(),
            ColumnRow::new("orders", 2, "customer_id")
                .with_type("int")
                .with_comment("buyer"),
            ColumnRow::new("orders", 3, "region_cd").with_type("char(2)"),
            ColumnRow::new("st_tr_sales", 1, "order_id").with_table_comment("Sales"),
        ],
        &[FkRow::new("orders", "customer_id", "customers", "id")],
    )
    .unwrap();
    let metadata = normalized.metadata;
    let relations = infer(&metadata);

    let graph = build_erd(&metadata, relations.clone());

    assert_eq!(graph.extracted_at, metadata.extracted_at);
    assert_eq!(graph.relations, relations);
    assert_eq!(graph.tables.len(), 3);

    let orders = graph.table("orders").unwrap();
    let flags: Vec<_> = orders
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.is_pk, c.is_fk))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("id", true, false),
            ("customer_id", false, true),
            ("region_cd", false, false),
        ]
    );
    assert_eq!(orders.columns[1].comment, "buyer");
    assert!(!orders.columns[0].nullable);

    let sales = graph.table("st_tr_sales").unwrap();
    assert_eq!(sales.domain, "ST_TR");
    assert_eq!(sales.comment, "Sales");
    // Inferred-only relations do not set the FK flag
    assert!(!sales.columns[0].is_fk);
}

#[test]
fn test_build_erd_passes_relations_through() {
    let normalized = normalize("shop", &[ColumnRow::new("orders", 1, "id")], &[]).unwrap();
    let graph = build_erd(&normalized.metadata, Vec::new());

    assert!(graph.relations.is_empty());
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["tables"][0]["columns"][0]["is_fk"], false);
    assert_eq!(json["tables"][0]["domain"], "ETC");
}
