use crate::error::StorageError;
use crate::theme::SiteTheme;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};

pub const SNAPSHOT_VERSION: u32 = 1;
const COMPRESSION_THRESHOLD: usize = 1024; // only compress snapshots > 1kb

/// what survives a page reload
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub version: u32,
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(default)]
    pub cwd: Vec<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub site_theme: Option<SiteTheme>,
    #[serde(default)]
    pub best_scores: HashMap<String, u32>,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct StoredSnapshot {
    compressed: bool,
    original_size: usize,
    payload: String, // raw json, or deflated + base64 when compressed
}

pub fn encode(snapshot: &SessionSnapshot) -> Result<String, StorageError> {
    let json = serde_json::to_string(snapshot)?;
    let original_size = json.len();
    let stored = if original_size > COMPRESSION_THRESHOLD {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(json.as_bytes())?;
        let bytes = encoder.finish()?;
        StoredSnapshot { compressed: true, original_size, payload: general_purpose::STANDARD.encode(bytes) }
    } else {
        StoredSnapshot { compressed: false, original_size, payload: json }
    };
    Ok(serde_json::to_string(&stored)?)
}

pub fn decode(raw: &str) -> Result<SessionSnapshot, StorageError> {
    let stored: StoredSnapshot = serde_json::from_str(raw)?;
    let json = if stored.compressed {
        let bytes = general_purpose::STANDARD.decode(stored.payload.as_bytes())?;
        let mut decoder = DeflateDecoder::new(&bytes[..]);
        let mut json = String::with_capacity(stored.original_size);
        decoder.read_to_string(&mut json)?;
        json
    } else {
        stored.payload
    };
    Ok(serde_json::from_str(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(target_arch = "wasm32")]
pub fn save(key: &str, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
    let encoded = encode(snapshot)?;
    local_storage()?
        .set_item(key, &encoded)
        .map_err(|_| StorageError::Unavailable)?;
    log::debug!("session saved ({} bytes)", encoded.len());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn load(key: &str) -> Result<Option<SessionSnapshot>, StorageError> {
    match local_storage()?.get_item(key) {
        Ok(Some(raw)) => decode(&raw).map(Some),
        Ok(None) => Ok(None),
        Err(_) => Err(StorageError::Unavailable),
    }
}

// no browser, nothing to persist
#[cfg(not(target_arch = "wasm32"))]
pub fn save(_key: &str, _snapshot: &SessionSnapshot) -> Result<(), StorageError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load(_key: &str) -> Result<Option<SessionSnapshot>, StorageError> {
    Ok(None)
}
