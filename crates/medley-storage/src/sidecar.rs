//! Sidecar metadata written next to every stored object.
//!
//! Object stores do not uniformly expose upload-time attributes, so each
//! backend writes a small JSON sidecar under `{key}.meta.json` carrying the
//! content type, the client-supplied file name, and the upload timestamp.
//! Sidecars are filtered out of listings. Upload validation never admits a
//! `.json` file, so a user object can never collide with a sidecar key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) const SIDECAR_SUFFIX: &str = ".meta.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SidecarMetadata {
    pub content_type: Option<String>,
    pub original_name: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl SidecarMetadata {
    pub fn new(content_type: &str, original_name: Option<&str>) -> Self {
        SidecarMetadata {
            content_type: (!content_type.is_empty()).then(|| content_type.to_string()),
            original_name: original_name.map(String::from),
            uploaded_at: Some(Utc::now()),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

pub(crate) fn sidecar_key(key: &str) -> String {
    format!("{}{}", key, SIDECAR_SUFFIX)
}

pub(crate) fn is_sidecar_key(key: &str) -> bool {
    key.ends_with(SIDECAR_SUFFIX)
}
