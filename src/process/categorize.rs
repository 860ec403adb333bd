//! Heuristic classification of tables, measures and columns by name and
//! expression substrings. Name checks take priority over expression checks.

use crate::types::model::{ColumnCategory, MeasureCategory};

const REVENUE_KEYWORDS: [&str; 4] = ["revenue", "sales", "ventas", "ingresos"];
const COST_KEYWORDS: [&str; 4] = ["cost", "costo", "expense", "gasto"];
const MARGIN_KEYWORDS: [&str; 4] = ["margin", "margen", "profit", "beneficio"];
const PERCENTAGE_KEYWORDS: [&str; 5] = ["%", "percent", "porcentaje", "ratio", "rate"];
const TEMPORAL_KEYWORDS: [&str; 5] = ["ytd", "sply", "year", "año", "period"];
const AGGREGATION_KEYWORDS: [&str; 4] = ["count", "total", "sum", "number"];
const CALENDAR_KEYWORDS: [&str; 4] = ["dateadd", "datesytd", "datesmtd", "datesqtd"];
const FILTERING_KEYWORDS: [&str; 4] = ["filter", "all", "selectedvalue", "hasonevalue"];

const IDENTIFIER_KEYWORDS: [&str; 4] = ["id", "sk.", "ck.", "key"];
const METRIC_KEYWORDS: [&str; 5] = ["cantidad", "monto", "total", "count", "amount"];
const DESCRIPTIVE_KEYWORDS: [&str; 4] = ["nombre", "descripcion", "name", "description"];
const NUMERIC_TYPES: [&str; 3] = ["int64", "double", "decimal"];

pub fn is_technical_table(table_name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| table_name.starts_with(prefix))
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

pub fn measure_category(name: &str, expression: &str) -> MeasureCategory {
    let name = name.to_lowercase();
    let expr = expression.to_lowercase();

    if contains_any(&name, &REVENUE_KEYWORDS) {
        return MeasureCategory::Revenue;
    }
    if contains_any(&name, &COST_KEYWORDS) {
        return MeasureCategory::Cost;
    }
    if contains_any(&name, &MARGIN_KEYWORDS) {
        return MeasureCategory::Margin;
    }
    if contains_any(&name, &PERCENTAGE_KEYWORDS) {
        return MeasureCategory::Percentage;
    }
    if contains_any(&name, &TEMPORAL_KEYWORDS) {
        return MeasureCategory::Temporal;
    }
    if contains_any(&name, &AGGREGATION_KEYWORDS)
        && (expr.contains("sum") || expr.contains("count") || expr.contains("total"))
    {
        return MeasureCategory::Aggregation;
    }
    if expr.contains('/') || expr.contains("divide") || expr.contains('%') {
        return MeasureCategory::Ratio;
    }
    if contains_any(&expr, &CALENDAR_KEYWORDS) {
        return MeasureCategory::CalendarIntelligence;
    }
    if contains_any(&expr, &FILTERING_KEYWORDS) {
        return MeasureCategory::Filtering;
    }
    MeasureCategory::Other
}

pub fn column_category(data_type: &str, column_name: &str) -> ColumnCategory {
    let name = column_name.to_lowercase();

    if contains_any(&name, &IDENTIFIER_KEYWORDS) {
        return ColumnCategory::Identifier;
    }
    if data_type == "dateTime" || data_type == "date" || name.contains("fecha") || name.contains("date")
    {
        return ColumnCategory::Temporal;
    }
    if NUMERIC_TYPES.contains(&data_type) {
        if contains_any(&name, &METRIC_KEYWORDS) {
            return ColumnCategory::Metric;
        }
        return ColumnCategory::Numeric;
    }
    if data_type == "string" {
        if contains_any(&name, &DESCRIPTIVE_KEYWORDS) {
            return ColumnCategory::Descriptive;
        }
        return ColumnCategory::Categorical;
    }
    ColumnCategory::Other
}
