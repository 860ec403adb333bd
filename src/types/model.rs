use serde::Serialize;

/// Cleaned metadata for one extracted model. This is the shape written to
/// `metadata.json` and consumed by every report generator.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub file_name: String,
    pub extraction_date: String,
    pub compatibility_level: Option<u64>,
    pub schema_fingerprint: String,
    pub summary: ModelSummary,
    pub tables: Vec<TableMeta>,
    pub relationships: Vec<RelationshipMeta>,
}

impl ModelMetadata {
    pub fn business_tables(&self) -> impl Iterator<Item = &TableMeta> {
        self.tables.iter().filter(|table| !table.is_technical)
    }
}

/// Column and measure counts include only visible items; table and
/// relationship counts cover the raw schema arrays.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelSummary {
    pub total_tables: usize,
    pub business_tables: usize,
    pub technical_tables: usize,
    pub total_columns: usize,
    pub total_measures: usize,
    pub total_relationships: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableMeta {
    pub name: String,
    pub is_hidden: bool,
    pub is_technical: bool,
    pub columns: Vec<ColumnMeta>,
    pub measures: Vec<MeasureMeta>,
    pub partition_count: usize,
}

impl TableMeta {
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnMeta> {
        self.columns.iter().filter(|column| !column.is_hidden)
    }

    pub fn visible_measures(&self) -> impl Iterator<Item = &MeasureMeta> {
        self.measures.iter().filter(|measure| !measure.is_hidden)
    }

    pub fn has_visible_measures(&self) -> bool {
        self.measures.iter().any(|measure| !measure.is_hidden)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnMeta {
    pub name: String,
    pub data_type: String,
    pub is_hidden: bool,
    pub source_column: String,
    pub format_string: String,
    pub category: ColumnCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeasureMeta {
    pub name: String,
    pub expression: String,
    pub formatted_expression: String,
    pub format_string: String,
    pub is_hidden: bool,
    pub display_folder: String,
    pub category: MeasureCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipMeta {
    pub name: String,
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub cardinality: String,
    pub cross_filtering: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureCategory {
    Revenue,
    Cost,
    Margin,
    Percentage,
    Ratio,
    Temporal,
    CalendarIntelligence,
    Aggregation,
    Filtering,
    Other,
}

impl MeasureCategory {
    /// Rendering order of category sections in the Markdown documentation.
    pub const DOC_ORDER: [MeasureCategory; 10] = [
        MeasureCategory::Revenue,
        MeasureCategory::Cost,
        MeasureCategory::Margin,
        MeasureCategory::Percentage,
        MeasureCategory::Ratio,
        MeasureCategory::Temporal,
        MeasureCategory::CalendarIntelligence,
        MeasureCategory::Aggregation,
        MeasureCategory::Filtering,
        MeasureCategory::Other,
    ];

    /// Categories surfaced in the key-measures section of the usage guide.
    pub const KEY_MEASURE_SECTIONS: [MeasureCategory; 7] = [
        MeasureCategory::Revenue,
        MeasureCategory::Cost,
        MeasureCategory::Margin,
        MeasureCategory::Percentage,
        MeasureCategory::Ratio,
        MeasureCategory::Temporal,
        MeasureCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MeasureCategory::Revenue => "revenue",
            MeasureCategory::Cost => "cost",
            MeasureCategory::Margin => "margin",
            MeasureCategory::Percentage => "percentage",
            MeasureCategory::Ratio => "ratio",
            MeasureCategory::Temporal => "temporal",
            MeasureCategory::CalendarIntelligence => "calendar_intelligence",
            MeasureCategory::Aggregation => "aggregation",
            MeasureCategory::Filtering => "filtering",
            MeasureCategory::Other => "other",
        }
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            MeasureCategory::Revenue => "category_revenue",
            MeasureCategory::Cost => "category_cost",
            MeasureCategory::Margin => "category_margin",
            MeasureCategory::Percentage => "category_percentage",
            MeasureCategory::Ratio => "category_ratio",
            MeasureCategory::Temporal => "category_temporal",
            MeasureCategory::CalendarIntelligence => "category_calendar_intelligence",
            MeasureCategory::Aggregation => "category_aggregation",
            MeasureCategory::Filtering => "category_filtering",
            MeasureCategory::Other => "category_other",
        }
    }

    /// Business importance used to rank measures in the agent context.
    pub fn priority(self) -> u8 {
        match self {
            MeasureCategory::Revenue => 1,
            MeasureCategory::Cost => 2,
            MeasureCategory::Margin => 3,
            MeasureCategory::Percentage => 4,
            MeasureCategory::Ratio => 5,
            MeasureCategory::Temporal => 6,
            MeasureCategory::Aggregation => 7,
            MeasureCategory::Filtering => 8,
            MeasureCategory::CalendarIntelligence => 9,
            MeasureCategory::Other => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnCategory {
    Identifier,
    Temporal,
    Metric,
    Numeric,
    Descriptive,
    Categorical,
    Other,
}

impl ColumnCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnCategory::Identifier => "identifier",
            ColumnCategory::Temporal => "temporal",
            ColumnCategory::Metric => "metric",
            ColumnCategory::Numeric => "numeric",
            ColumnCategory::Descriptive => "descriptive",
            ColumnCategory::Categorical => "categorical",
            ColumnCategory::Other => "other",
        }
    }
}
