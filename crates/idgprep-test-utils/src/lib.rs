//! Shared test fixtures for idgprep crates.
//!
//! [`TsvFixture`] owns a temporary directory that tests populate with target
//! list files and later read the consolidated output back from.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub use pretty_assertions::assert_eq;

/// Temporary input/output directory for pipeline tests.
pub struct TsvFixture {
    dir: TempDir,
}

impl TsvFixture {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create fixture directory")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a TSV file from a header and rows, `\n` terminated.
    pub fn write_table(&self, name: &str, header: &[&str], rows: &[&[&str]]) -> Result<PathBuf> {
        let mut content = header.join("\t");
        content.push('\n');
        for row in rows {
            content.push_str(&row.join("\t"));
            content.push('\n');
        }
        self.write_raw(name, content.as_bytes())
    }

    /// Write arbitrary bytes, for malformed input cases.
    pub fn write_raw(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write fixture {:?}", path))?;
        Ok(path)
    }

    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.join(name);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))
    }

    pub fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.join(name);
        std::fs::read(&path).with_context(|| format!("Failed to read {:?}", path))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.join(name).exists()
    }
}

/// The two-file scenario used across integration tests: overlapping ABL1,
/// mixed header casing, one family per IDG class.
pub fn write_scenario(fixture: &TsvFixture) -> Result<Vec<PathBuf>> {
    let a = fixture.write_table(
        "idg_target_list_A.tsv",
        &["gene", "idgfamily"],
        &[&["ABL1", "kinase"], &["ADRB2", "gpcr"]],
    )?;
    let b = fixture.write_table(
        "idg_target_list_B.tsv",
        &["Gene", "IDGFamily"],
        &[&["ABL1", "Kinase"], &["CACNA1A", "ionchannel"]],
    )?;
    Ok(vec![a, b])
}

pub const SCENARIO_OUTPUT: &str =
    "Gene\tIDGFamily\r\nABL1\tKinase\r\nADRB2\tGPCR\r\nCACNA1A\tIonChannel\r\n";
