//! Compact JSON context for AI agents.

use crate::dax::complexity::{self, Complexity};
use crate::i18n::{self, Lang};
use crate::types::model::{ColumnCategory, MeasureCategory, ModelMetadata};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AgentContext {
    pub model_name: String,
    pub summary: AgentSummary,
    pub key_measures: Vec<KeyMeasure>,
    pub temporal_columns: Vec<TemporalColumn>,
    pub sample_questions: Vec<&'static str>,
    pub extraction_date: String,
    pub usage_notes: Vec<&'static str>,
}

/// `total_tables` deliberately counts business tables only; technical
/// date/parameter tables are noise for agents.
#[derive(Debug, Serialize)]
pub struct AgentSummary {
    pub total_tables: usize,
    pub total_measures: usize,
    pub total_relationships: usize,
    pub compatibility_level: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct KeyMeasure {
    pub name: String,
    pub table: String,
    pub expression: String,
    pub formatted_expression: String,
    pub category: MeasureCategory,
    pub complexity: Complexity,
    pub format_string: String,
}

#[derive(Debug, Serialize)]
pub struct TemporalColumn {
    pub name: String,
    pub table: String,
    pub data_type: String,
}

const KEY_MEASURE_LIMIT: usize = 20;

pub fn agent_context(metadata: &ModelMetadata, lang: Lang) -> AgentContext {
    let mut key_measures = Vec::new();
    for table in metadata.business_tables() {
        for measure in table.visible_measures() {
            key_measures.push(KeyMeasure {
                name: measure.name.clone(),
                table: table.name.clone(),
                expression: measure.expression.clone(),
                formatted_expression: measure.formatted_expression.clone(),
                category: measure.category,
                complexity: complexity::rate(&measure.expression),
                format_string: measure.format_string.clone(),
            });
        }
    }
    key_measures.sort_by(|a, b| {
        (a.category.priority(), a.name.as_str()).cmp(&(b.category.priority(), b.name.as_str()))
    });
    key_measures.truncate(KEY_MEASURE_LIMIT);

    let temporal_columns = metadata
        .business_tables()
        .flat_map(|table| {
            table
                .visible_columns()
                .filter(|column| column.category == ColumnCategory::Temporal)
                .map(move |column| TemporalColumn {
                    name: column.name.clone(),
                    table: table.name.clone(),
                    data_type: column.data_type.clone(),
                })
        })
        .collect();

    AgentContext {
        model_name: metadata.file_name.clone(),
        summary: AgentSummary {
            total_tables: metadata.summary.business_tables,
            total_measures: metadata.summary.total_measures,
            total_relationships: metadata.summary.total_relationships,
            compatibility_level: metadata.compatibility_level,
        },
        key_measures,
        temporal_columns,
        sample_questions: i18n::SAMPLE_QUESTION_KEYS
            .iter()
            .map(|key| i18n::tr(lang, key))
            .collect(),
        extraction_date: metadata.extraction_date.clone(),
        usage_notes: i18n::USAGE_NOTE_KEYS
            .iter()
            .map(|key| i18n::tr(lang, key))
            .collect(),
    }
}
