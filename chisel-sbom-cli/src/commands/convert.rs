//! `chisel-sbom convert` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use chisel_sbom_builder::{Converter, ConverterConfig, write_spdx_json};
use chisel_sbom_core::config::DocumentConfig;

use crate::cli::ConvertArgs;
use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `convert` command.
pub async fn execute(
    args: ConvertArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = load_config(config_path).await?;

    let mut converter_config = ConverterConfig::from_core(&config.document);
    if let Some(name) = args.name {
        converter_config.document_name = name;
    }
    let converter = Converter::new(converter_config)?;

    let output_path = resolve_output_path(&args.manifest, args.output, &config.document);
    info!(
        manifest = %args.manifest.display(),
        output = %output_path.display(),
        "converting manifest"
    );

    let manifest = args.manifest.clone();
    let (graph, json) = tokio::task::spawn_blocking(move || {
        let graph = converter.convert_path(&manifest)?;
        let mut json = Vec::new();
        write_spdx_json(&graph, &converter.spdx_options(), &mut json)?;
        Ok::<_, chisel_sbom_builder::SbomBuilderError>((graph, json))
    })
    .await
    .map_err(|e| CliError::Command(format!("conversion task failed: {e}")))??;

    tokio::fs::write(&output_path, json).await.map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", output_path.display()),
        ))
    })?;
    info!(path = %output_path.display(), "spdx document written");

    let report = ConvertReport {
        manifest: args.manifest.display().to_string(),
        output: output_path.display().to_string(),
        document_name: graph.name.clone(),
        packages: graph.package_count(),
        slices: graph.slice_count(),
        files: graph.files.len(),
        relationships: graph.relationships.len(),
    };
    writer.render(&report)?;

    Ok(())
}

/// Output goes next to the manifest unless given explicitly.
fn resolve_output_path(
    manifest: &Path,
    output: Option<PathBuf>,
    document: &DocumentConfig,
) -> PathBuf {
    output.unwrap_or_else(|| {
        manifest
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&document.output_file_name)
    })
}

/// Summary of a finished conversion.
#[derive(Serialize)]
pub struct ConvertReport {
    /// Input manifest path
    pub manifest: String,
    /// Written SPDX document path
    pub output: String,
    /// SPDX document name
    pub document_name: String,
    /// Top-level package count
    pub packages: usize,
    /// Slice count
    pub slices: usize,
    /// File count (directories excluded)
    pub files: usize,
    /// Relationship count
    pub relationships: usize,
}

impl Render for ConvertReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Manifest: {}", self.manifest.bold())?;
        writeln!(w, "SBOM: {} ({})", self.output.green().bold(), self.document_name)?;
        writeln!(w)?;
        writeln!(w, "  Packages:      {}", self.packages)?;
        writeln!(w, "  Slices:        {}", self.slices)?;
        writeln!(w, "  Files:         {}", self.files)?;
        writeln!(w, "  Relationships: {}", self.relationships)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ConvertReport {
        ConvertReport {
            manifest: "/rootfs/var/lib/chisel/manifest.wall".to_owned(),
            output: "/rootfs/var/lib/chisel/manifest.spdx.json".to_owned(),
            document_name: "manifest".to_owned(),
            packages: 2,
            slices: 3,
            files: 10,
            relationships: 15,
        }
    }

    #[test]
    fn test_default_output_next_to_manifest() {
        let path = resolve_output_path(
            Path::new("/rootfs/var/lib/chisel/manifest.wall"),
            None,
            &DocumentConfig::default(),
        );
        assert_eq!(path, PathBuf::from("/rootfs/var/lib/chisel/manifest.spdx.json"));
    }

    #[test]
    fn test_default_output_for_bare_file_name() {
        let path = resolve_output_path(Path::new("manifest.wall"), None, &DocumentConfig::default());
        assert_eq!(path, PathBuf::from("manifest.spdx.json"));
    }

    #[test]
    fn test_default_output_uses_configured_file_name() {
        let document = DocumentConfig {
            output_file_name: "sbom.json".to_owned(),
            ..Default::default()
        };
        let path = resolve_output_path(Path::new("/m/manifest.wall"), None, &document);
        assert_eq!(path, PathBuf::from("/m/sbom.json"));
    }

    #[test]
    fn test_explicit_output_wins() {
        let path = resolve_output_path(
            Path::new("/m/manifest.wall"),
            Some(PathBuf::from("/tmp/out.json")),
            &DocumentConfig::default(),
        );
        assert_eq!(path, PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_convert_report_render_text() {
        let mut buffer = Vec::new();
        report()
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("manifest.wall"));
        assert!(output.contains("manifest.spdx.json"));
        assert!(output.contains("Relationships: 15"));
    }

    #[test]
    fn test_convert_report_json_fields() {
        let json = serde_json::to_string(&report()).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");
        assert_eq!(parsed["document_name"], "manifest");
        assert_eq!(parsed["packages"], 2);
        assert_eq!(parsed["slices"], 3);
        assert_eq!(parsed["files"], 10);
    }
}
