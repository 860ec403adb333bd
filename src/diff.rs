//! Membership diff between two processed models.

use crate::types::model::ModelMetadata;
use serde::Serialize;
use std::collections::BTreeSet;

type MeasureKey = (String, String);
type RelationshipKey = (String, String, String, String, String, String);

#[derive(Debug, Serialize)]
pub struct ModelDiff {
    pub a_model: String,
    pub b_model: String,
    pub measures_added: Vec<MeasureKey>,
    pub measures_removed: Vec<MeasureKey>,
    pub relationships_added: Vec<RelationshipKey>,
    pub relationships_removed: Vec<RelationshipKey>,
}

fn measure_set(metadata: &ModelMetadata) -> BTreeSet<MeasureKey> {
    metadata
        .tables
        .iter()
        .flat_map(|table| {
            table
                .measures
                .iter()
                .map(|measure| (table.name.clone(), measure.name.clone()))
        })
        .collect()
}

fn relationship_set(metadata: &ModelMetadata) -> BTreeSet<RelationshipKey> {
    metadata
        .relationships
        .iter()
        .map(|relationship| {
            (
                relationship.from_table.clone(),
                relationship.from_column.clone(),
                relationship.to_table.clone(),
                relationship.to_column.clone(),
                relationship.cardinality.clone(),
                relationship.cross_filtering.clone(),
            )
        })
        .collect()
}

pub fn diff_models(a: &ModelMetadata, b: &ModelMetadata) -> ModelDiff {
    let a_measures = measure_set(a);
    let b_measures = measure_set(b);
    let a_relationships = relationship_set(a);
    let b_relationships = relationship_set(b);

    ModelDiff {
        a_model: a.file_name.clone(),
        b_model: b.file_name.clone(),
        measures_added: b_measures.difference(&a_measures).cloned().collect(),
        measures_removed: a_measures.difference(&b_measures).cloned().collect(),
        relationships_added: b_relationships
            .difference(&a_relationships)
            .cloned()
            .collect(),
        relationships_removed: a_relationships
            .difference(&b_relationships)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::tests::minimal_metadata;

    #[test]
    fn identical_models_diff_empty() {
        let a = minimal_metadata();
        let b = minimal_metadata();
        let diff = diff_models(&a, &b);
        assert!(diff.measures_added.is_empty());
        assert!(diff.measures_removed.is_empty());
        assert!(diff.relationships_added.is_empty());
        assert!(diff.relationships_removed.is_empty());
    }

    #[test]
    fn added_and_removed_measures_are_reported() {
        let a = minimal_metadata();
        let mut b = minimal_metadata();
        b.tables[0].measures[0].name = "Net Sales".to_string();

        let diff = diff_models(&a, &b);
        assert_eq!(
            diff.measures_added,
            vec![("Sales".to_string(), "Net Sales".to_string())]
        );
        assert_eq!(
            diff.measures_removed,
            vec![("Sales".to_string(), "Total Sales".to_string())]
        );
    }

    #[test]
    fn relationship_changes_are_reported() {
        let a = minimal_metadata();
        let mut b = minimal_metadata();
        b.relationships[0].cross_filtering = "BothDirections".to_string();

        let diff = diff_models(&a, &b);
        assert_eq!(diff.relationships_added.len(), 1);
        assert_eq!(diff.relationships_removed.len(), 1);
        assert_eq!(diff.relationships_added[0].5, "BothDirections");
    }

    #[test]
    fn diff_serializes_model_names() {
        let diff = diff_models(&minimal_metadata(), &minimal_metadata());
        let json = serde_json::to_string(&diff).expect("diff should serialize");
        assert!(json.contains("\"a_model\":\"SalesModel\""));
        assert!(json.contains("\"measures_added\":[]"));
    }
}
