//! Loader for the sample documents under `docs/samples`

use crate::sgf::charset::parse_bytes;
use crate::sgf::lexing::{tokenize, Spanned};
use crate::sgf::parsing::{Collection, ParseError, ParseOptions};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("sample not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Access to the vetted sample files, by file name (e.g. `010-game-record.sgf`)
pub struct Samples;

impl Samples {
    fn samples_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("docs/samples")
    }

    /// Names of all samples (sorted)
    pub fn list() -> Result<Vec<String>, SampleError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(Self::samples_dir())? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "sgf") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn get_bytes(name: &str) -> Result<Vec<u8>, SampleError> {
        let path = Self::samples_dir().join(name);
        if !path.is_file() {
            return Err(SampleError::NotFound(name.to_string()));
        }
        Ok(fs::read(path)?)
    }

    pub fn get_source(name: &str) -> Result<String, SampleError> {
        let bytes = Self::get_bytes(name)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    // ===== Convenience "must_" methods that panic on error =====

    pub fn must_get_source(name: &str) -> String {
        Self::get_source(name).unwrap_or_else(|e| panic!("Failed to load sample {}: {}", name, e))
    }

    pub fn must_tokenize(name: &str) -> Vec<Spanned> {
        tokenize(&Self::must_get_source(name))
    }

    /// Parse a sample through the byte entry point. Panics if the sample can't be read.
    pub fn parse(name: &str, options: &ParseOptions) -> Result<Collection, ParseError> {
        let bytes = Self::get_bytes(name)
            .unwrap_or_else(|e| panic!("Failed to load sample {}: {}", name, e));
        parse_bytes(&bytes, options)
    }

    pub fn must_parse(name: &str) -> Collection {
        Self::parse(name, &ParseOptions::default())
            .unwrap_or_else(|e| panic!("Failed to parse sample {}: {}", name, e))
    }
}
