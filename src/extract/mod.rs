pub mod decode;

use crate::error::{PbiDocsError, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Archive entry names that may hold the model schema, in search order.
pub const MODEL_ENTRY_KEYS: [&str; 3] = ["DataModelSchema", "DataModel", "model.json"];

/// A parsed model schema together with the archive entry it came from and a
/// fingerprint of the raw entry bytes.
#[derive(Debug, Clone)]
pub struct RawSchema {
    pub value: Value,
    pub entry_name: String,
    pub fingerprint: String,
}

pub fn validate_input_file(input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(PbiDocsError::InputNotFound(input.display().to_string()));
    }
    if !input.is_file() {
        return Err(PbiDocsError::NotAFile(input.display().to_string()));
    }
    let extension_ok = input
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.eq_ignore_ascii_case("pbit"))
        .unwrap_or(false);
    if !extension_ok {
        return Err(PbiDocsError::UnsupportedExtension(
            input.display().to_string(),
        ));
    }
    if std::fs::metadata(input)?.len() == 0 {
        return Err(PbiDocsError::EmptyInput(input.display().to_string()));
    }
    Ok(())
}

/// Reads and parses the model schema from a `.pbit` archive. Candidate
/// entries are tried in order; the first one that decodes, parses, and
/// passes the shape check wins.
pub fn parse_model_schema(input: &Path) -> Result<RawSchema> {
    validate_input_file(input)?;

    let file = File::open(input)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| PbiDocsError::InvalidArchive(format!("{}: {}", input.display(), e)))?;

    let names: Vec<String> = archive.file_names().map(String::from).collect();
    if names.is_empty() {
        return Err(PbiDocsError::SchemaNotFound(format!(
            "{} is empty or corrupted",
            input.display()
        )));
    }

    let candidates: Vec<String> = names
        .iter()
        .filter(|name| MODEL_ENTRY_KEYS.iter().any(|key| name.contains(key)))
        .cloned()
        .collect();
    if candidates.is_empty() {
        let available: Vec<&str> = names
            .iter()
            .filter(|name| !name.starts_with('_'))
            .take(10)
            .map(String::as_str)
            .collect();
        return Err(PbiDocsError::SchemaNotFound(format!(
            "no DataModelSchema, DataModel or model.json entry in {}; available entries: {}",
            input.display(),
            available.join(", ")
        )));
    }

    let mut last_error: Option<PbiDocsError> = None;
    for name in &candidates {
        let mut bytes = Vec::new();
        match archive.by_name(name) {
            Ok(mut entry) => {
                if let Err(e) = entry.read_to_end(&mut bytes) {
                    last_error = Some(e.into());
                    continue;
                }
            }
            Err(e) => {
                last_error = Some(e.into());
                continue;
            }
        }

        match parse_schema_bytes(&bytes, name) {
            Ok(value) => {
                return Ok(RawSchema {
                    value,
                    entry_name: name.clone(),
                    fingerprint: sha256_hex(&bytes),
                });
            }
            Err(e) => {
                tracing::warn!(entry = name.as_str(), error = %e, "model entry failed to parse");
                last_error = Some(e);
            }
        }
    }

    let last = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    Err(PbiDocsError::SchemaParse(format!(
        "no model entry could be parsed from {}; attempted: {}; last error: {}",
        input.display(),
        candidates.join(", "),
        last
    )))
}

fn parse_schema_bytes(bytes: &[u8], entry_name: &str) -> Result<Value> {
    let text = decode::decode_with_fallback(bytes);

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => {
            validate_schema_shape(&value)?;
            Ok(value)
        }
        Err(first_error) => {
            let cleaned = decode::clean_json_text(&text);
            match serde_json::from_str::<Value>(&cleaned) {
                Ok(value) => {
                    validate_schema_shape(&value)?;
                    Ok(value)
                }
                Err(second_error) => {
                    let snippet: String = cleaned.chars().take(500).collect();
                    Err(PbiDocsError::SchemaParse(format!(
                        "{entry_name}: {first_error}; after cleanup: {second_error}; snippet: {snippet}"
                    )))
                }
            }
        }
    }
}

pub fn validate_schema_shape(value: &Value) -> Result<()> {
    let root = value
        .as_object()
        .ok_or_else(|| PbiDocsError::SchemaShape("schema root must be a JSON object".to_string()))?;

    let model = match root.get("model") {
        Some(model) => model,
        None => {
            let available: Vec<&str> = root.keys().take(5).map(String::as_str).collect();
            return Err(PbiDocsError::SchemaShape(format!(
                "schema does not contain a 'model' key; available keys: {}",
                available.join(", ")
            )));
        }
    };
    let model = model
        .as_object()
        .ok_or_else(|| PbiDocsError::SchemaShape("'model' must be an object".to_string()))?;

    for key in ["tables", "relationships"] {
        match model.get(key) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(PbiDocsError::SchemaShape(format!(
                    "'model.{key}' must be an array"
                )));
            }
            None => {
                return Err(PbiDocsError::SchemaShape(format!(
                    "model does not contain required key: {key}"
                )));
            }
        }
    }

    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;

    fn write_pbit(dir: &Path, file_name: &str, entry: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.join(file_name);
        let file = File::create(&path).expect("archive file should create");
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file(entry, FileOptions::default())
            .expect("entry should start");
        writer.write_all(content).expect("entry should write");
        writer.finish().expect("archive should finish");
        path
    }

    fn minimal_schema_text() -> String {
        json!({
            "compatibilityLevel": 1603,
            "model": { "tables": [], "relationships": [] }
        })
        .to_string()
    }

    #[test]
    fn rejects_missing_file() {
        let err = parse_model_schema(Path::new("/does/not/exist.pbit"))
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn rejects_wrong_extension() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("model.zip");
        std::fs::write(&path, "data").expect("file should write");
        let err = parse_model_schema(&path).expect_err("wrong extension should fail");
        assert!(err.to_string().contains("unsupported input extension"));
    }

    #[test]
    fn rejects_empty_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("model.pbit");
        std::fs::write(&path, "").expect("file should write");
        let err = parse_model_schema(&path).expect_err("empty file should fail");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_non_zip_input() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("model.pbit");
        std::fs::write(&path, "this is not a zip archive").expect("file should write");
        let err = parse_model_schema(&path).expect_err("non-zip should fail");
        assert!(err.to_string().contains("not a valid zip archive"));
    }

    #[test]
    fn rejects_archive_without_model_entry() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = write_pbit(dir.path(), "model.pbit", "Report/Layout", b"{}");
        let err = parse_model_schema(&path).expect_err("missing entry should fail");
        assert!(err.to_string().contains("model schema not found"));
        assert!(err.to_string().contains("Report/Layout"));
    }

    #[test]
    fn parses_utf8_schema_entry() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = write_pbit(
            dir.path(),
            "model.pbit",
            "DataModelSchema",
            minimal_schema_text().as_bytes(),
        );
        let raw = parse_model_schema(&path).expect("schema should parse");
        assert_eq!(raw.entry_name, "DataModelSchema");
        assert_eq!(raw.value["compatibilityLevel"], 1603);
        assert_eq!(raw.fingerprint.len(), 64);
    }

    #[test]
    fn parses_utf16le_schema_entry() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in minimal_schema_text().encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let path = write_pbit(dir.path(), "model.pbit", "DataModelSchema", &bytes);
        let raw = parse_model_schema(&path).expect("utf-16 schema should parse");
        assert_eq!(raw.value["model"]["tables"], json!([]));
    }

    #[test]
    fn recovers_schema_with_comments_and_trailing_commas() {
        let dir = TempDir::new().expect("temp dir should be created");
        let text = "{\n// generated\n\"model\": {\"tables\": [], \"relationships\": [],},\n}";
        let path = write_pbit(dir.path(), "model.pbit", "DataModelSchema", text.as_bytes());
        let raw = parse_model_schema(&path).expect("cleaned schema should parse");
        assert!(raw.value["model"]["relationships"].is_array());
    }

    #[test]
    fn shape_check_reports_missing_model_key() {
        let err = validate_schema_shape(&json!({"name": "x", "version": 2}))
            .expect_err("shape check should fail");
        assert!(err.to_string().contains("'model' key"));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn shape_check_requires_array_tables() {
        let err = validate_schema_shape(&json!({"model": {"tables": {}, "relationships": []}}))
            .expect_err("shape check should fail");
        assert!(err.to_string().contains("'model.tables' must be an array"));
    }
}
