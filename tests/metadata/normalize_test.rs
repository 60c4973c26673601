// tests/metadata/normalize_test.rs
use chrono::{TimeZone, Utc};
use erdai::metadata::{
    classify, normalize, normalize_at, ColumnRow, Diagnostic, FkRow, MetadataError, RowKind,
};

fn shop_columns() -> Vec<ColumnRow> {
    vec![
        ColumnRow::new("orders", 1, "id").with_type("int").primary_key(),
        ColumnRow::new("orders", 2, "customer_id").with_type("int"),
        ColumnRow::new("orders", 3, "order_no").with_type("varchar(20)"),
        ColumnRow::new("customers", 1, "id").with_type("int").primary_key(),
        ColumnRow::new("customers", 2, "name").with_type("varchar(100)"),
        ColumnRow::new("st_tr_sales", 1, "sale_id").with_type("bigint").primary_key(),
        ColumnRow::new("st_tr_sales", 2, "region_cd").with_type("char(2)"),
    ]
}

#[test]
fn test_domain_classification() {
    assert_eq!(classify("st_tr_sales"), "ST_TR");
    assert_eq!(classify("r_indicatorinfo"), "R");
    assert_eq!(classify("orders"), "ETC");
    assert_eq!(classify("a_b_customer"), "A_B");
}

#[test]
fn test_tables_sorted_by_name_with_domains() {
    let result = normalize("shop", &shop_columns(), &[]).unwrap();
    let names: Vec<_> = result.metadata.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["customers", "orders", "st_tr_sales"]);

    let domains: Vec<_> = result.metadata.tables.iter().map(|t| t.domain.as_str()).collect();
    assert_eq!(domains, vec!["ETC", "ETC", "ST_TR"]);
}

#[test]
fn test_sort_is_ordinal() {
    let rows = vec![
        ColumnRow::new("b_items", 1, "id"),
        ColumnRow::new("Zeta", 1, "id"),
        ColumnRow::new("alpha", 1, "id"),
    ];
    let result = normalize("s", &rows, &[]).unwrap();
    let names: Vec<_> = result.metadata.tables.iter().map(|t| t.name.as_str()).collect();
    // Uppercase sorts before lowercase
    assert_eq!(names, vec!["Zeta", "alpha", "b_items"]);
}

#[test]
fn test_counts() {
    let fks = vec![FkRow::new("orders", "customer_id", "customers", "id")];
    let result = normalize("shop", &shop_columns(), &fks).unwrap();

    assert_eq!(result.metadata.schema_name, "shop");
    assert_eq!(result.metadata.table_count, 3);
    assert_eq!(result.metadata.column_count, 7);
    assert_eq!(result.metadata.fk_count, 1);
    assert!(!result.has_diagnostics());
}

#[test]
fn test_column_order_preserved_not_corrected() {
    let rows = vec![
        ColumnRow::new("orders", 2, "customer_id"),
        ColumnRow::new("orders", 1, "id").primary_key(),
        ColumnRow::new("orders", 3, "total"),
    ];
    let result = normalize("shop", &rows, &[]).unwrap();
    let orders = &result.metadata.tables[0];

    let col_nos: Vec<_> = orders.columns.iter().map(|c| c.col_no).collect();
    assert_eq!(col_nos, vec![2, 1, 3]);

    let sorted_rows = vec![
        ColumnRow::new("orders", 1, "id").primary_key(),
        ColumnRow::new("orders", 2, "customer_id"),
        ColumnRow::new("orders", 3, "total"),
    ];
    let result = normalize("shop", &sorted_rows, &[]).unwrap();
    let col_nos: Vec<_> = result.metadata.tables[0].columns.iter().map(|c| c.col_no).collect();
    assert_eq!(col_nos, vec![1, 2, 3]);
}

#[test]
fn test_primary_keys_in_column_order() {
    let rows = vec![
        ColumnRow::new("order_items", 1, "order_id").primary_key(),
        ColumnRow::new("order_items", 2, "qty"),
        ColumnRow::new("order_items", 3, "line_no").primary_key(),
    ];
    let result = normalize("shop", &rows, &[]).unwrap();
    let table = &result.metadata.tables[0];

    assert_eq!(table.pk_columns, vec!["order_id", "line_no"]);
    assert!(table.columns[0].is_pk);
    assert!(!table.columns[0].nullable);
    assert_eq!(table.columns[0].key_type, "PRI");
    assert!(!table.columns[1].is_pk);
    assert!(table.columns[1].nullable);
}

#[test]
fn test_column_fields_copied() {
    let mut row = ColumnRow::new("orders", 1, "status")
        .with_type("varchar(10)")
        .with_comment("Order status");
    row.default_value = Some("'NEW'".to_string());
    row.extra_info = Some("on update".to_string());

    let result = normalize("shop", &[row], &[]).unwrap();
    let col = &result.metadata.tables[0].columns[0];

    assert_eq!(col.data_type, "varchar(10)");
    assert_eq!(col.comment, "Order status");
    assert_eq!(col.default_value.as_deref(), Some("'NEW'"));
    assert_eq!(col.extra, "on update");
    assert_eq!(col.key_type, "");
}

#[test]
fn test_unknown_fk_table_dropped_not_fatal() {
    let fks = vec![
        FkRow::new("orders", "customer_id", "customers", "id"),
        FkRow::new("ghost", "order_id", "orders", "id"),
    ];
    let result = normalize("shop", &shop_columns(), &fks).unwrap();

    // Counter still reflects every raw row
    assert_eq!(result.metadata.fk_count, 2);
    assert_eq!(result.metadata.attached_fk_count(), 1);

    for table in &result.metadata.tables {
        assert!(table.fk_refs.iter().all(|fk| fk.constraint_name != "fk_ghost_order_id"));
    }

    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::UnknownFkTable {
            index: 1,
            table: "ghost".to_string(),
            column: "order_id".to_string(),
            constraint: "fk_ghost_order_id".to_string(),
        }]
    );
}

#[test]
fn test_fk_attached_with_default_rules() {
    let fks = vec![FkRow::new("orders", "customer_id", "customers", "id")];
    let result = normalize("shop", &shop_columns(), &fks).unwrap();

    let orders = result.metadata.table("orders").unwrap();
    assert_eq!(orders.fk_refs.len(), 1);
    let fk = &orders.fk_refs[0];
    assert_eq!(fk.ref_table, "customers");
    assert_eq!(fk.ref_column, "id");
    assert_eq!(fk.update_rule, "NO ACTION");
    assert_eq!(fk.delete_rule, "NO ACTION");
}

#[test]
fn test_malformed_column_row_is_typed_error() {
    let rows = vec![
        ColumnRow::new("orders", 1, "id"),
        ColumnRow::new("orders", 2, ""),
    ];
    let err = normalize("shop", &rows, &[]).unwrap_err();
    assert_eq!(
        err,
        MetadataError::MalformedRow {
            kind: RowKind::Column,
            index: 1,
            field: "column_name",
        }
    );
    assert_eq!(
        err.to_string(),
        "malformed column row #1: missing required field 'column_name'"
    );
}

#[test]
fn test_rows_from_json() {
    let columns: Vec<ColumnRow> = serde_json::from_str(
        r#"[
            {"table_name": "customers", "table_comment": "Customer master", "col_no": 1,
             "column_name": "id", "data_type": "int", "nullable_yn": "N",
             "key_type": "PRI", "pk_yn": "Y", "default_value": null,
             "extra_info": "auto_increment", "column_comment": null}
        ]"#,
    )
    .unwrap();
    let fks: Vec<FkRow> = serde_json::from_str("[]").unwrap();

    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let result = normalize_at("shop", &columns, &fks, at).unwrap();
    let table = &result.metadata.tables[0];

    assert_eq!(table.comment, "Customer master");
    assert_eq!(table.columns[0].extra, "auto_increment");
    assert_eq!(table.columns[0].comment, "");
    assert_eq!(result.metadata.extracted_at, "2024-01-02T03:04:05.000000+00:00");
}

#[test]
fn test_metadata_json_shape() {
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let result = normalize_at("shop", &[ColumnRow::new("orders", 1, "id")], &[], at).unwrap();
    let json = serde_json::to_value(&result.metadata).unwrap();

    assert_eq!(json["schema_name"], "shop");
    assert_eq!(json["table_count"], 1);
    assert_eq!(json["tables"][0]["columns"][0]["name"], "id");
    assert_eq!(json["tables"][0]["pk_columns"], serde_json::json!([]));
    assert_eq!(json["tables"][0]["fk_refs"], serde_json::json!([]));
}
