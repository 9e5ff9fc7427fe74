// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores the fitted SalaryPipeline.
//
// What gets written:
//   1. <artifact>              — bincode encoding of the pipeline
//                                (vocabularies + every tree node)
//   2. <artifact>.report.json  — human-readable training report,
//                                never read back by the predictor
//
// Example layout:
//   models/
//     salary_model.bin
//     salary_model.bin.report.json
//     metrics.csv               ← see metrics.rs
//
// Writes go to a hidden temp file in the same directory, then
// rename over the target: a failed write leaves the previous
// artifact untouched.
//
// Loading decodes the bytes and then validates the pipeline's
// shape (vocabularies sorted, tree links in range, encoder width
// == forest width) before anyone can predict with it.
//
// Reference: bincode crate documentation
//            Rust Book §9 (Error Handling)

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::domain::error::{SalaryError, SalaryResult};
use crate::ml::pipeline::SalaryPipeline;

pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<artifact>.report.json` next to the artifact
    pub fn report_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".report.json");
        self.path.with_file_name(name)
    }

    /// Directory holding the artifact ("." for a bare file name)
    pub fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Serialise the pipeline and replace any previous artifact.
    pub fn save_pipeline(&self, pipeline: &SalaryPipeline) -> SalaryResult<()> {
        let bytes = bincode::serialize(pipeline).map_err(|e| {
            SalaryError::Persistence(format!("bincode serialization failed: {e}"))
        })?;

        write_atomic(&self.path, &bytes)?;
        tracing::info!("Saved model ({} bytes) to '{}'", bytes.len(), self.path.display());
        Ok(())
    }

    /// Read, decode and validate the artifact.
    pub fn load_pipeline(&self) -> SalaryResult<SalaryPipeline> {
        let bytes = fs::read(&self.path).map_err(|e| {
            SalaryError::ArtifactLoad(format!(
                "cannot read '{}': {e}. Have you run 'train' first?",
                self.path.display()
            ))
        })?;

        let pipeline: SalaryPipeline = bincode::deserialize(&bytes).map_err(|e| {
            SalaryError::ArtifactLoad(format!(
                "'{}' is not a compatible model artifact: {e}",
                self.path.display()
            ))
        })?;

        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Write any serialisable report as pretty JSON next to the artifact.
    pub fn save_report<T: Serialize>(&self, report: &T) -> SalaryResult<()> {
        let json = serde_json::to_string_pretty(report).map_err(|e| {
            SalaryError::Persistence(format!("cannot encode training report: {e}"))
        })?;

        let path = self.report_path();
        write_atomic(&path, json.as_bytes())?;
        tracing::debug!("Saved training report to '{}'", path.display());
        Ok(())
    }
}

/// Write `bytes` to a temp file beside `path`, then rename into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> SalaryResult<()> {
    let persistence = |what: &str, target: &Path, e: std::io::Error| {
        SalaryError::Persistence(format!("cannot {what} '{}': {e}", target.display()))
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| SalaryError::Persistence(format!("'{}' is not a file path", path.display())))?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| persistence("create directory", &dir, e))?;

    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp = dir.join(tmp_name);

    fs::write(&tmp, bytes).map_err(|e| persistence("write", &tmp, e))?;

    if let Err(e) = fs::rename(&tmp, path) {
        // Best effort: the temp file is useless once the rename failed
        let _ = fs::remove_file(&tmp);
        return Err(persistence("replace", path, e));
    }
    Ok(())
}
