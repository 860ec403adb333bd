//! Per-file orchestration: extract, process, and write the four artifacts.

use crate::error::Result;
use crate::extract;
use crate::i18n::Lang;
use crate::process;
use crate::report;
use crate::types::config::PbiDocsConfig;
use crate::types::model::ModelMetadata;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct EmittedArtifacts {
    pub dir: PathBuf,
    #[allow(dead_code)]
    pub metadata: PathBuf,
    #[allow(dead_code)]
    pub markdown: PathBuf,
    #[allow(dead_code)]
    pub agent_context: PathBuf,
    #[allow(dead_code)]
    pub jsonl: PathBuf,
}

pub fn process_file(
    input: &Path,
    output_base: &Path,
    lang: Lang,
    config: &PbiDocsConfig,
) -> Result<(ModelMetadata, EmittedArtifacts)> {
    tracing::info!(input = %input.display(), "processing file");

    let raw = extract::parse_model_schema(input)?;
    tracing::debug!(entry = raw.entry_name.as_str(), "schema entry selected");

    let metadata = process::process_schema(&raw, input, config)?;
    tracing::info!(
        tables = metadata.summary.total_tables,
        measures = metadata.summary.total_measures,
        relationships = metadata.summary.total_relationships,
        "metadata processed"
    );

    let dir = output_base.join(format!("{}.pbit", metadata.file_name));
    fs::create_dir_all(&dir)?;

    let metadata_path = dir.join("metadata.json");
    fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)?;

    let markdown_path = dir.join("model_documentation.md");
    fs::write(&markdown_path, report::md::markdown(&metadata, lang))?;

    let agent_path = dir.join("agent_context.json");
    let agent = report::agent::agent_context(&metadata, lang);
    fs::write(&agent_path, serde_json::to_string_pretty(&agent)?)?;

    let jsonl_path = dir.join("model_context.jsonl");
    let entries = report::jsonl::model_context(&metadata);
    fs::write(&jsonl_path, report::jsonl::to_jsonl(&entries)?)?;

    tracing::info!(dir = %dir.display(), "artifacts written");

    Ok((
        metadata,
        EmittedArtifacts {
            dir,
            metadata: metadata_path,
            markdown: markdown_path,
            agent_context: agent_path,
            jsonl: jsonl_path,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;

    fn write_minimal_pbit(dir: &Path, file_name: &str) -> PathBuf {
        let schema = json!({
            "compatibilityLevel": 1603,
            "model": {
                "tables": [
                    {
                        "name": "Sales",
                        "columns": [
                            { "name": "OrderDate", "dataType": "dateTime" }
                        ],
                        "measures": [
                            { "name": "Total Sales", "expression": "SUM(Sales[Amount])" }
                        ]
                    }
                ],
                "relationships": []
            }
        });

        let path = dir.join(file_name);
        let file = File::create(&path).expect("archive file should create");
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("DataModelSchema", FileOptions::default())
            .expect("entry should start");
        writer
            .write_all(schema.to_string().as_bytes())
            .expect("entry should write");
        writer.finish().expect("archive should finish");
        path
    }

    #[test]
    fn process_file_writes_all_four_artifacts() {
        let work = TempDir::new().expect("temp dir should be created");
        let input = write_minimal_pbit(work.path(), "SalesModel.pbit");
        let output_base = work.path().join("out");

        let (metadata, artifacts) = process_file(
            &input,
            &output_base,
            Lang::En,
            &PbiDocsConfig::default(),
        )
        .expect("pipeline should succeed");

        assert_eq!(metadata.file_name, "SalesModel");
        assert_eq!(artifacts.dir, output_base.join("SalesModel.pbit"));
        for path in [
            &artifacts.metadata,
            &artifacts.markdown,
            &artifacts.agent_context,
            &artifacts.jsonl,
        ] {
            assert!(path.exists(), "{} should exist", path.display());
        }

        let metadata_json: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&artifacts.metadata).expect("metadata should read"),
        )
        .expect("metadata should be valid json");
        assert_eq!(metadata_json["summary"]["total_measures"], 1);
        assert_eq!(
            metadata_json["schema_fingerprint"]
                .as_str()
                .map(str::len),
            Some(64)
        );

        let markdown =
            fs::read_to_string(&artifacts.markdown).expect("markdown should read");
        assert!(markdown.contains("# SalesModel - Power BI Data Model"));
    }
}
