//! Markdown documentation generator.

use crate::dax;
use crate::dax::complexity;
use crate::i18n::{self, Lang};
use crate::types::model::{MeasureCategory, MeasureMeta, ModelMetadata, TableMeta};
use chrono::Utc;
use std::collections::HashMap;

pub fn markdown(metadata: &ModelMetadata, lang: Lang) -> String {
    let summary = &metadata.summary;
    let mut doc = String::new();

    doc.push_str(&format!(
        "# {} - {}\n\n",
        metadata.file_name,
        i18n::tr(lang, "power_bi_data_model")
    ));
    doc.push_str(&format!(
        "**{}:** {}\n\n",
        i18n::tr(lang, "generated"),
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));
    doc.push_str(&format!("## {}\n\n", i18n::tr(lang, "model_summary")));
    doc.push_str(&format!(
        "- **{}:** {}\n",
        i18n::tr(lang, "business_tables"),
        summary.business_tables
    ));
    doc.push_str(&format!(
        "- **{}:** {}\n",
        i18n::tr(lang, "total_columns"),
        summary.total_columns
    ));
    doc.push_str(&format!(
        "- **{}:** {}\n",
        i18n::tr(lang, "total_measures"),
        summary.total_measures
    ));
    doc.push_str(&format!(
        "- **{}:** {}\n\n",
        i18n::tr(lang, "relationships"),
        summary.total_relationships
    ));
    doc.push_str("---\n\n");
    doc.push_str(&format!("## {}\n\n", i18n::tr(lang, "tables_and_measures")));

    for table in metadata.business_tables() {
        if table.is_hidden && !table.has_visible_measures() {
            continue;
        }
        push_table_section(&mut doc, table, lang);
    }

    if !metadata.relationships.is_empty() {
        doc.push_str(&format!("## {}\n\n", i18n::tr(lang, "relationships")));
        doc.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i18n::tr(lang, "from"),
            i18n::tr(lang, "to"),
            i18n::tr(lang, "type"),
            i18n::tr(lang, "direction")
        ));
        doc.push_str("|------|----|------|-----------|\n");
        for relationship in &metadata.relationships {
            doc.push_str(&format!(
                "| {}.{} | {}.{} | {} | {} |\n",
                relationship.from_table,
                relationship.from_column,
                relationship.to_table,
                relationship.to_column,
                relationship.cardinality,
                relationship.cross_filtering
            ));
        }
        doc.push('\n');
    }

    push_usage_guide(&mut doc, metadata, lang);
    doc
}

fn push_table_section(doc: &mut String, table: &TableMeta, lang: Lang) {
    if table.is_hidden {
        doc.push_str(&format!(
            "### {} *({})*\n\n",
            table.name,
            i18n::tr(lang, "hidden_table_measures_only")
        ));
    } else {
        doc.push_str(&format!("### {}\n\n", table.name));
    }

    let visible_columns: Vec<_> = table.visible_columns().collect();
    if !visible_columns.is_empty() {
        doc.push_str(&format!("**{}:**\n\n", i18n::tr(lang, "columns")));
        doc.push_str(&format!(
            "| {} | {} | {} |\n",
            i18n::tr(lang, "column"),
            i18n::tr(lang, "type"),
            i18n::tr(lang, "category")
        ));
        doc.push_str("|--------|------|----------|\n");
        for column in &visible_columns {
            doc.push_str(&format!(
                "| `{}` | {} | {} |\n",
                column.name,
                column.data_type,
                column.category.as_str()
            ));
        }
        doc.push('\n');
    }

    let visible_measures: Vec<&MeasureMeta> = table.visible_measures().collect();
    if visible_measures.is_empty() {
        return;
    }

    doc.push_str(&format!("**{}:**\n\n", i18n::tr(lang, "measures")));
    let mut by_category: HashMap<MeasureCategory, Vec<&MeasureMeta>> = HashMap::new();
    for measure in visible_measures {
        by_category.entry(measure.category).or_default().push(measure);
    }

    for category in MeasureCategory::DOC_ORDER {
        let Some(measures) = by_category.get(&category) else {
            continue;
        };
        doc.push_str(&format!("##### {}\n\n", i18n::category_name(lang, category)));
        for measure in measures {
            let rating = complexity::rate(&measure.expression);
            doc.push_str(&format!(
                "**{}** *({})*\n\n",
                measure.name,
                i18n::complexity_label(lang, rating)
            ));
            if !measure.display_folder.is_empty() {
                doc.push_str(&format!(
                    "*{}:* `{}`\n\n",
                    i18n::tr(lang, "folder"),
                    measure.display_folder
                ));
            }
            if !measure.formatted_expression.is_empty() {
                doc.push_str(&format!(
                    "```dax\n{}\n```\n\n",
                    dax::escape_for_markdown(&measure.formatted_expression)
                ));
            }
            if !measure.format_string.is_empty() {
                doc.push_str(&format!(
                    "*{}:* `{}`\n\n",
                    i18n::tr(lang, "format"),
                    measure.format_string
                ));
            }
            doc.push_str("---\n\n");
        }
        doc.push('\n');
    }
    doc.push('\n');
}

fn push_usage_guide(doc: &mut String, metadata: &ModelMetadata, lang: Lang) {
    doc.push_str("---\n\n");
    doc.push_str(&format!("## {}\n\n", i18n::tr(lang, "ai_agent_usage_guide")));
    doc.push_str(&format!("{}\n\n", i18n::tr(lang, "usage_guide_description")));
    for step in 1..=4 {
        let key = format!("usage_guide_{step}");
        doc.push_str(&format!("{step}. {}\n", i18n::tr(lang, &key)));
    }
    doc.push('\n');
    doc.push_str(&format!(
        "### {}\n\n",
        i18n::tr(lang, "key_measures_available")
    ));

    let mut by_category: HashMap<MeasureCategory, Vec<(&MeasureMeta, &str)>> = HashMap::new();
    for table in metadata.business_tables() {
        for measure in table.visible_measures() {
            by_category
                .entry(measure.category)
                .or_default()
                .push((measure, table.name.as_str()));
        }
    }

    let from_word = i18n::tr(lang, "from").to_lowercase();
    for category in MeasureCategory::KEY_MEASURE_SECTIONS {
        let Some(measures) = by_category.get(&category) else {
            continue;
        };
        doc.push_str(&format!("\n#### {}:\n\n", i18n::category_name(lang, category)));
        for (measure, table_name) in measures.iter().take(5) {
            doc.push_str(&format!(
                "- **{}** ({from_word} {table_name})\n",
                measure.name
            ));
            if !measure.format_string.is_empty() {
                doc.push_str(&format!(
                    "  - {}: `{}`\n",
                    i18n::tr(lang, "format"),
                    measure.format_string
                ));
            }
            doc.push('\n');
        }
    }
}
