// pydantic-gen-core/src/application/convert.rs

use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::GeneratorError;
use crate::infrastructure::formats::{ConfigFormat, load_document, save_document};
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConversionSummary {
    pub from: &'static str,
    pub to: &'static str,
}

/// Rewrites a configuration file in the format of `output`'s extension.
pub fn convert_file(input: &Path, output: &Path) -> Result<ConversionSummary, GeneratorError> {
    let document = load_document(input)?;
    let from = ConfigFormat::from_path(input)
        .ok_or_else(|| InfrastructureError::UnsupportedFormat(input.to_path_buf()))?;
    let to = save_document(&document, output)?;

    info!(input = %input.display(), output = %output.display(), from = from.name(), to = to.name(), "Converted configuration");
    Ok(ConversionSummary {
        from: from.name(),
        to: to.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_convert_ini_to_json() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("db.ini");
        fs::write(&input, "[DEFAULT]\nport = 5432\n[db]\nhost = localhost\n")?;
        let output = dir.path().join("db.json");

        let summary = convert_file(&input, &output)?;
        assert_eq!((summary.from, summary.to), ("ini", "json"));
        assert_eq!(
            fs::read_to_string(&output)?,
            "{\n  \"db\": {\n    \"host\": \"localhost\",\n    \"port\": \"5432\"\n  }\n}\n"
        );
        Ok(())
    }

    #[test]
    fn test_convert_yaml_to_ini() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("app.yaml");
        fs::write(&input, "server:\n  debug: true\n  workers: 4\n")?;
        let output = dir.path().join("app.ini");

        convert_file(&input, &output)?;
        assert_eq!(
            fs::read_to_string(&output)?,
            "[server]\ndebug = true\nworkers = 4\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_convert_scalar_top_level_to_ini_fails() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("app.yaml");
        fs::write(&input, "name: demo\n")?;

        let result = convert_file(&input, &dir.path().join("app.ini"));
        assert!(result.is_err());
        assert!(!dir.path().join("app.ini").exists());
        Ok(())
    }

    #[test]
    fn test_convert_json_with_percent_to_ini_reads_back() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("disk.json");
        fs::write(&input, r#"{"disk": {"usage": "100%"}}"#)?;
        let ini = dir.path().join("disk.ini");

        convert_file(&input, &ini)?;
        assert_eq!(fs::read_to_string(&ini)?, "[disk]\nusage = 100%%\n\n");
        assert_eq!(load_document(&ini)?, load_document(&input)?);
        Ok(())
    }
}
