//! Snapshot Models
//!
//! Point-in-time captures of file content. Content is stored
//! zlib-compressed with a SHA-256 hash for change detection.

use chrono::{DateTime, Utc};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::{Read, Write};

use crate::utils::error::{AppError, AppResult};

/// A single capture of a file's content at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Path of the captured file
    pub file_path: String,
    /// SHA-256 of the uncompressed content, hex-encoded
    pub hash: String,
    /// Uncompressed size in bytes
    pub size_bytes: usize,
    /// Zlib-compressed content
    #[serde(skip_serializing, default)]
    pub compressed: Vec<u8>,
    /// Capture time
    pub created_at: DateTime<Utc>,
}

/// Compute the hex-encoded SHA-256 of content
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl Snapshot {
    /// Capture content at the given time
    pub fn capture(
        file_path: impl Into<String>,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes())?;
        let compressed = encoder.finish()?;
        Ok(Self {
            file_path: file_path.into(),
            hash: content_hash(content),
            size_bytes: content.len(),
            compressed,
            created_at,
        })
    }

    /// Decompress the captured content
    pub fn content(&self) -> AppResult<String> {
        let mut decoder = ZlibDecoder::new(self.compressed.as_slice());
        let mut content = String::with_capacity(self.size_bytes);
        decoder.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Rebuild from stored columns, validating the hash field is present
    pub fn from_stored(
        file_path: String,
        hash: String,
        size_bytes: usize,
        compressed: Vec<u8>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if hash.is_empty() {
            return Err(AppError::database("snapshot row missing content hash"));
        }
        Ok(Self {
            file_path,
            hash,
            size_bytes,
            compressed,
            created_at,
        })
    }
}
