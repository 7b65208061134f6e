use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{AUDIO_EXTENSIONS, MAX_AUDIO_FILE_BYTES};

#[derive(Error, Debug)]
pub enum AudioFileError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),
    #[error("not an audio file: {0}")]
    NotAudio(PathBuf),
    #[error("{path} is {size} bytes, the limit is {limit} bytes")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An audio file that passed the upload rules: audio extension, regular
/// file, no larger than [`MAX_AUDIO_FILE_BYTES`].
#[derive(Clone, Debug, PartialEq)]
pub struct AudioFile {
    path: PathBuf,
    size: u64,
}

impl AudioFile {
    pub fn accept(path: &Path) -> Result<Self, AudioFileError> {
        Self::accept_with_limit(path, MAX_AUDIO_FILE_BYTES)
    }

    pub fn accept_with_limit(path: &Path, limit: u64) -> Result<Self, AudioFileError> {
        if !path.exists() {
            return Err(AudioFileError::NotFound(path.to_path_buf()));
        }
        if !is_audio(path) {
            return Err(AudioFileError::NotAudio(path.to_path_buf()));
        }

        let metadata = fs::metadata(path).map_err(|e| AudioFileError::Metadata {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_file() {
            return Err(AudioFileError::NotAudio(path.to_path_buf()));
        }
        if metadata.len() > limit {
            return Err(AudioFileError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
