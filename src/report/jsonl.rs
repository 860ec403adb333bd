//! Line-delimited context entries for embedding and retrieval pipelines.

use crate::dax::complexity::{self, Complexity};
use crate::types::model::{
    MeasureCategory, MeasureMeta, ModelMetadata, ModelSummary, RelationshipMeta, TableMeta,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContextEntry {
    Model(ModelEntry),
    Table(TableEntry),
    Measure(MeasureEntry),
    Relationship(RelationshipEntry),
}

#[derive(Debug, Serialize)]
pub struct ModelEntry {
    pub id: String,
    pub title: String,
    pub summary: ModelSummary,
    pub compatibility_level: Option<u64>,
    pub extraction_date: String,
    pub sample_prompts: Vec<String>,
    pub short_summary: String,
}

#[derive(Debug, Serialize)]
pub struct TableEntry {
    pub id: String,
    pub title: String,
    pub columns: Vec<ColumnInfo>,
    pub sample_prompts: Vec<String>,
    pub short_summary: String,
}

#[derive(Debug, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    /// Reserved for column descriptions once the schema carries them.
    pub desc: String,
}

#[derive(Debug, Serialize)]
pub struct MeasureEntry {
    pub id: String,
    pub title: String,
    pub expression: String,
    pub formatted_expression: String,
    pub format_string: String,
    pub category: MeasureCategory,
    pub complexity: Complexity,
    pub sample_prompts: Vec<String>,
    pub short_summary: String,
}

#[derive(Debug, Serialize)]
pub struct RelationshipEntry {
    pub id: String,
    pub title: String,
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub cardinality: String,
    pub cross_filtering: String,
    pub is_active: bool,
    pub sample_prompts: Vec<String>,
    pub short_summary: String,
}

const TABLE_PROMPT_LIMIT: usize = 6;

pub fn model_context(metadata: &ModelMetadata) -> Vec<ContextEntry> {
    let mut entries = vec![ContextEntry::Model(model_entry(metadata))];

    for table in metadata.business_tables() {
        if table.is_hidden && !table.has_visible_measures() {
            continue;
        }
        entries.push(ContextEntry::Table(table_entry(table)));
        for measure in table.visible_measures() {
            entries.push(ContextEntry::Measure(measure_entry(measure, &table.name)));
        }
    }

    for relationship in &metadata.relationships {
        entries.push(ContextEntry::Relationship(relationship_entry(relationship)));
    }

    entries
}

pub fn to_jsonl(entries: &[ContextEntry]) -> Result<String, serde_json::Error> {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        lines.push(serde_json::to_string(entry)?);
    }
    let mut output = lines.join("\n");
    output.push('\n');
    Ok(output)
}

fn model_entry(metadata: &ModelMetadata) -> ModelEntry {
    ModelEntry {
        id: "model_overview".to_string(),
        title: format!("Model: {}", metadata.file_name),
        summary: metadata.summary.clone(),
        compatibility_level: metadata.compatibility_level,
        extraction_date: metadata.extraction_date.clone(),
        sample_prompts: vec![
            "How many tables does this model have?".to_string(),
            "What are the main measures in the model?".to_string(),
            "Explain the general structure of the model".to_string(),
            "What tables are related?".to_string(),
        ],
        short_summary: format!(
            "Power BI model with {} business tables, {} measures and {} relationships",
            metadata.summary.business_tables,
            metadata.summary.total_measures,
            metadata.summary.total_relationships
        ),
    }
}

fn table_entry(table: &TableMeta) -> TableEntry {
    let visible_columns: Vec<_> = table.visible_columns().collect();
    let visible_measures: Vec<_> = table.visible_measures().collect();

    let columns = visible_columns
        .iter()
        .map(|column| ColumnInfo {
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            desc: String::new(),
        })
        .collect();

    let mut sample_prompts = Vec::new();
    for measure in visible_measures.iter().take(3) {
        sample_prompts.push(format!(
            "What is the measure that calculates {}?",
            measure.name.to_lowercase()
        ));
        sample_prompts.push(format!("Explain how the {} measure works", measure.name));
    }
    sample_prompts.push(format!(
        "What relationships does the {} table have?",
        table.name
    ));
    sample_prompts.push(format!("Explain the structure of the {} table", table.name));
    sample_prompts.truncate(TABLE_PROMPT_LIMIT);

    let mut short_summary = format!("Table {}", table.name);
    if !visible_columns.is_empty() {
        short_summary.push_str(&format!(" with {} columns", visible_columns.len()));
    }
    if !visible_measures.is_empty() {
        let measure_names: Vec<&str> = visible_measures
            .iter()
            .take(5)
            .map(|measure| measure.name.as_str())
            .collect();
        short_summary.push_str(&format!(". Contains measures: {}", measure_names.join(", ")));
    }

    TableEntry {
        id: table.name.clone(),
        title: if table.is_hidden {
            format!("{} (Hidden)", table.name)
        } else {
            table.name.clone()
        },
        columns,
        sample_prompts,
        short_summary,
    }
}

fn measure_entry(measure: &MeasureMeta, table_name: &str) -> MeasureEntry {
    let rating = complexity::rate(&measure.expression);

    let mut sample_prompts = vec![
        format!("What does the {} measure calculate?", measure.name),
        format!("Explain the formula for {}", measure.name),
        format!("How to use {} in an analysis?", measure.name),
        format!("What filters can I apply to {}?", measure.name),
    ];
    match rating {
        Complexity::Complex => {
            sample_prompts.push(format!("Why is the {} measure complex?", measure.name));
            sample_prompts.push(format!("How to simplify {}?", measure.name));
        }
        Complexity::Simple => {
            sample_prompts.push(format!("How to optimize {}?", measure.name));
            sample_prompts.push(format!("What variations of {} exist?", measure.name));
        }
        Complexity::Medium => {}
    }

    let mut short_summary = format!(
        "Measure {} of type {}",
        measure.name,
        measure.category.as_str()
    );
    if !measure.format_string.is_empty() {
        short_summary.push_str(&format!(" with format {}", measure.format_string));
    }

    MeasureEntry {
        id: format!("{}.{}", table_name, measure.name),
        title: format!("{} ({})", measure.name, measure.category.as_str()),
        expression: measure.expression.clone(),
        formatted_expression: measure.formatted_expression.clone(),
        format_string: measure.format_string.clone(),
        category: measure.category,
        complexity: rating,
        sample_prompts,
        short_summary,
    }
}

fn relationship_entry(relationship: &RelationshipMeta) -> RelationshipEntry {
    let sample_prompts = vec![
        format!(
            "How are {} and {} related?",
            relationship.from_table, relationship.to_table
        ),
        format!(
            "Explain the cardinality between {} and {}",
            relationship.from_table, relationship.to_table
        ),
        format!("What does the {} relationship mean?", relationship.name),
        format!(
            "How does filtering affect the relationship {}.{} -> {}.{}?",
            relationship.from_table,
            relationship.from_column,
            relationship.to_table,
            relationship.to_column
        ),
    ];

    let mut short_summary = format!(
        "Relationship {} between {}.{} and {}.{}",
        relationship.cardinality,
        relationship.from_table,
        relationship.from_column,
        relationship.to_table,
        relationship.to_column
    );
    if !relationship.is_active {
        short_summary.push_str(" (inactive)");
    }

    RelationshipEntry {
        id: relationship.name.clone(),
        title: format!(
            "Relationship: {} -> {}",
            relationship.from_table, relationship.to_table
        ),
        from_table: relationship.from_table.clone(),
        from_column: relationship.from_column.clone(),
        to_table: relationship.to_table.clone(),
        to_column: relationship.to_column.clone(),
        cardinality: relationship.cardinality.clone(),
        cross_filtering: relationship.cross_filtering.clone(),
        is_active: relationship.is_active,
        sample_prompts,
        short_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::tests::minimal_metadata;

    fn entry_type(entry: &ContextEntry) -> &'static str {
        match entry {
            ContextEntry::Model(_) => "model",
            ContextEntry::Table(_) => "table",
            ContextEntry::Measure(_) => "measure",
            ContextEntry::Relationship(_) => "relationship",
        }
    }

    #[test]
    fn context_covers_all_entry_types() {
        let entries = model_context(&minimal_metadata());
        let types: Vec<&str> = entries.iter().map(entry_type).collect();
        assert!(types.contains(&"model"));
        assert!(types.contains(&"table"));
        assert!(types.contains(&"measure"));
        assert!(types.contains(&"relationship"));
    }

    #[test]
    fn model_entry_matches_summary() {
        let metadata = minimal_metadata();
        let entries = model_context(&metadata);
        let ContextEntry::Model(model) = &entries[0] else {
            panic!("first entry should be the model overview");
        };
        assert_eq!(model.id, "model_overview");
        assert_eq!(model.summary.total_measures, 1);
        assert!(model.short_summary.contains("1 business tables"));
    }

    #[test]
    fn hidden_table_without_visible_measures_is_excluded() {
        let mut metadata = minimal_metadata();
        metadata.tables[0].is_hidden = true;
        metadata.tables[0].measures[0].is_hidden = true;

        let entries = model_context(&metadata);
        assert!(entries
            .iter()
            .all(|entry| entry_type(entry) != "table" && entry_type(entry) != "measure"));
    }

    #[test]
    fn measure_entry_is_scoped_to_its_table() {
        let entries = model_context(&minimal_metadata());
        let measure = entries
            .iter()
            .find_map(|entry| match entry {
                ContextEntry::Measure(measure) => Some(measure),
                _ => None,
            })
            .expect("measure entry should exist");
        assert_eq!(measure.id, "Sales.Total Sales");
        assert!(!measure.sample_prompts.is_empty());
        assert!(measure.short_summary.contains("with format $#,0"));
    }

    #[test]
    fn jsonl_serializes_one_tagged_object_per_line() {
        let entries = model_context(&minimal_metadata());
        let jsonl = to_jsonl(&entries).expect("entries should serialize");
        let lines: Vec<&str> = jsonl.trim_end().lines().collect();
        assert_eq!(lines.len(), entries.len());
        for line in lines {
            let value: serde_json::Value =
                serde_json::from_str(line).expect("each line should be valid json");
            assert!(value.get("type").is_some());
            assert!(value.get("id").is_some());
        }
    }
}
