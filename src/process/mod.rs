pub mod categorize;

use crate::dax;
use crate::error::{PbiDocsError, Result};
use crate::extract::RawSchema;
use crate::types::config::PbiDocsConfig;
use crate::types::model::{
    ColumnMeta, MeasureMeta, ModelMetadata, ModelSummary, RelationshipMeta, TableMeta,
};
use chrono::Utc;
use serde_json::Value;
use std::path::Path;

/// Transforms a raw schema into cleaned metadata. Malformed tables, columns,
/// measures and relationships are logged and skipped; processing never
/// aborts on a single bad item.
pub fn process_schema(
    raw: &RawSchema,
    input_file: &Path,
    config: &PbiDocsConfig,
) -> Result<ModelMetadata> {
    let model = raw
        .value
        .get("model")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            PbiDocsError::SchemaShape("schema does not contain a 'model' object".to_string())
        })?;
    let tables = model
        .get("tables")
        .and_then(Value::as_array)
        .ok_or_else(|| PbiDocsError::SchemaShape("'model.tables' must be an array".to_string()))?;
    let relationships = model
        .get("relationships")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PbiDocsError::SchemaShape("'model.relationships' must be an array".to_string())
        })?;

    let prefixes = config.technical_prefixes();
    let indent_width = config.indent_width();

    let mut summary = ModelSummary {
        total_tables: tables.len(),
        total_relationships: relationships.len(),
        ..ModelSummary::default()
    };

    let mut processed_tables = Vec::with_capacity(tables.len());
    for table in tables {
        let Some(table) = process_table(table, &prefixes, indent_width) else {
            continue;
        };
        summary.total_columns += table.visible_columns().count();
        summary.total_measures += table.visible_measures().count();
        if table.is_technical {
            summary.technical_tables += 1;
        } else {
            summary.business_tables += 1;
        }
        processed_tables.push(table);
    }

    let mut processed_relationships = Vec::with_capacity(relationships.len());
    for (index, relationship) in relationships.iter().enumerate() {
        match process_relationship(relationship) {
            Some(relationship) => processed_relationships.push(relationship),
            None => tracing::warn!(index, "skipping malformed relationship"),
        }
    }

    Ok(ModelMetadata {
        file_name: file_stem(input_file),
        extraction_date: Utc::now().to_rfc3339(),
        compatibility_level: raw.value.get("compatibilityLevel").and_then(Value::as_u64),
        schema_fingerprint: raw.fingerprint.clone(),
        summary,
        tables: processed_tables,
        relationships: processed_relationships,
    })
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn process_table(table: &Value, prefixes: &[String], indent_width: usize) -> Option<TableMeta> {
    let Some(name) = table.get("name").and_then(Value::as_str) else {
        tracing::warn!("skipping table without a name");
        return None;
    };

    let columns = table
        .get("columns")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let measures = table
        .get("measures")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut processed_columns = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        match process_column(column) {
            Some(column) => processed_columns.push(column),
            None => tracing::warn!(table = name, index, "skipping malformed column"),
        }
    }

    let mut processed_measures = Vec::with_capacity(measures.len());
    for (index, measure) in measures.iter().enumerate() {
        match process_measure(measure, indent_width) {
            Some(measure) => processed_measures.push(measure),
            None => tracing::warn!(table = name, index, "skipping malformed measure"),
        }
    }

    Some(TableMeta {
        name: name.to_string(),
        is_hidden: bool_field(table, "isHidden"),
        is_technical: categorize::is_technical_table(name, prefixes),
        columns: processed_columns,
        measures: processed_measures,
        partition_count: table
            .get("partitions")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0),
    })
}

fn process_column(column: &Value) -> Option<ColumnMeta> {
    let name = column.get("name").and_then(Value::as_str)?;
    let data_type = string_field(column, "dataType", "unknown");

    Some(ColumnMeta {
        category: categorize::column_category(&data_type, name),
        name: name.to_string(),
        data_type,
        is_hidden: bool_field(column, "isHidden"),
        source_column: string_field(column, "sourceColumn", ""),
        format_string: string_field(column, "formatString", ""),
    })
}

fn process_measure(measure: &Value, indent_width: usize) -> Option<MeasureMeta> {
    let name = measure.get("name").and_then(Value::as_str)?;

    let raw_expression = expression_text(measure.get("expression"));
    let expression = dax::clean_expression(&raw_expression);
    let formatted_expression = dax::format_expression(&expression, indent_width);

    Some(MeasureMeta {
        category: categorize::measure_category(name, &expression),
        name: name.to_string(),
        expression,
        formatted_expression,
        format_string: string_field(measure, "formatString", ""),
        is_hidden: bool_field(measure, "isHidden"),
        display_folder: string_field(measure, "displayFolder", ""),
    })
}

fn process_relationship(relationship: &Value) -> Option<RelationshipMeta> {
    let from_table = relationship.get("fromTable").and_then(Value::as_str)?;
    let from_column = relationship.get("fromColumn").and_then(Value::as_str)?;
    let to_table = relationship.get("toTable").and_then(Value::as_str)?;
    let to_column = relationship.get("toColumn").and_then(Value::as_str)?;

    Some(RelationshipMeta {
        name: string_field(relationship, "name", ""),
        from_table: from_table.to_string(),
        from_column: from_column.to_string(),
        to_table: to_table.to_string(),
        to_column: to_column.to_string(),
        cardinality: format!(
            "{}:{}",
            string_field(relationship, "fromCardinality", "many"),
            string_field(relationship, "toCardinality", "one")
        ),
        cross_filtering: string_field(relationship, "crossFilteringBehavior", "OneDirection"),
        is_active: relationship
            .get("isActive")
            .and_then(Value::as_bool)
            .unwrap_or(true),
    })
}

/// Schema expressions may be a string or an array of lines.
fn expression_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" "),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn string_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn bool_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}
