//! Artifact export
//!
//! Writes the views of one run next to each other under a common prefix:
//! `<prefix>.csv`, `<prefix>.json`, `<prefix>.dep.json`, `<prefix>.graph.json`
//! and, when enabled, `<prefix>.enums.json`, `<prefix>.dot` and
//! `<prefix>.manifest.json`.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{PathsError, Result};
use crate::graph::{PathRecord, SchemaPaths};
use crate::manifest::RunManifest;

/// `<prefix><suffix>`, keeping any dots already in the prefix
pub fn artifact_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, format: OutputFormat) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
        OutputFormat::Compact => serde_json::to_writer(&mut writer, value)?,
    }
    writer.flush()?;
    Ok(())
}

/// Path list with an `id,full_path,description` header
pub fn write_path_list(path: &Path, records: &[PathRecord], delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(path)?;

    // written up front so an empty list still carries its header
    writer.write_record(["id", "full_path", "description"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// The path list delimiter as a single byte. Only ASCII delimiters are
/// accepted so the CSV stays valid UTF-8.
pub fn csv_delimiter(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(PathsError::InvalidConfig(format!(
            "output.delimiter must be an ASCII character, got {:?}",
            delimiter
        )))
    }
}

/// Write every configured artifact and return the paths written, in order.
/// The tree artifact holds `null` when the blocklist removed the root.
pub fn write_artifacts(
    paths: &SchemaPaths,
    manifest: Option<RunManifest>,
    output: &OutputConfig,
) -> Result<Vec<PathBuf>> {
    let delimiter = csv_delimiter(output.delimiter)?;
    let prefix = output.out_path.as_path();
    if let Some(parent) = prefix.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut written = Vec::new();

    let csv_path = artifact_path(prefix, ".csv");
    write_path_list(&csv_path, &paths.paths, delimiter)?;
    written.push(csv_path);

    let tree_path = artifact_path(prefix, ".json");
    write_json(&tree_path, &paths.tree, output.format)?;
    written.push(tree_path);

    let dep_path = artifact_path(prefix, ".dep.json");
    write_json(&dep_path, &paths.dependencies.to_records(), output.format)?;
    written.push(dep_path);

    let graph_path = artifact_path(prefix, ".graph.json");
    write_json(&graph_path, &paths.graph, output.format)?;
    written.push(graph_path);

    if output.write_enums {
        let enums_path = artifact_path(prefix, ".enums.json");
        write_json(&enums_path, &paths.enums, output.format)?;
        written.push(enums_path);
    }

    if output.write_dot {
        let dot_path = artifact_path(prefix, ".dot");
        fs::write(&dot_path, paths.containment_graph().to_dot())?;
        written.push(dot_path);
    }

    if let Some(mut manifest) = manifest {
        let manifest_path = artifact_path(prefix, ".manifest.json");
        written.push(manifest_path.clone());
        manifest.artifacts = written.clone();
        write_json(&manifest_path, &manifest, OutputFormat::Pretty)?;
    }

    for path in &written {
        tracing::info!(path = %path.display(), "wrote artifact");
    }

    Ok(written)
}
