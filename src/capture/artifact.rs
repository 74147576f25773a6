// Finished recordings and their revocable object URLs

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// URL scheme prefix for registered payloads
const OBJECT_URL_PREFIX: &str = "blob:teleprompter/";

/// Bytes of a finished recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPayload {
    pub data: Vec<u8>,
    /// Container MIME type, e.g. `video/webm`
    pub mime_type: String,
    /// File extension without the dot
    pub extension: String,
}

/// Registry of object URLs pointing at in-memory payloads
///
/// Cloning shares the registry. A URL stays resolvable until revoked.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    entries: Arc<Mutex<HashMap<String, Arc<ArtifactPayload>>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload and return its URL
    pub fn create(&self, payload: Arc<ArtifactPayload>) -> String {
        let url = format!("{}{}", OBJECT_URL_PREFIX, Uuid::new_v4());
        self.entries.lock().insert(url.clone(), payload);
        url
    }

    pub fn resolve(&self, url: &str) -> Option<Arc<ArtifactPayload>> {
        self.entries.lock().get(url).cloned()
    }

    /// Release a URL; returns false if it was not registered
    pub fn revoke(&self, url: &str) -> bool {
        self.entries.lock().remove(url).is_some()
    }

    /// Number of live URLs
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A completed recording waiting to be downloaded or dismissed
#[derive(Debug, Clone)]
pub struct Artifact {
    id: Uuid,
    url: String,
    payload: Arc<ArtifactPayload>,
    chunk_count: usize,
    created_at: DateTime<Utc>,
}

impl Artifact {
    /// Concatenate chunks into one payload and register its URL
    pub fn assemble(
        chunks: Vec<Vec<u8>>,
        mime_type: &str,
        extension: &str,
        urls: &ObjectUrlRegistry,
    ) -> Self {
        let chunk_count = chunks.len();
        let payload = Arc::new(ArtifactPayload {
            data: chunks.concat(),
            mime_type: mime_type.to_string(),
            extension: extension.to_string(),
        });
        let url = urls.create(payload.clone());
        Self {
            id: Uuid::new_v4(),
            url,
            payload,
            chunk_count,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn payload(&self) -> &ArtifactPayload {
        &self.payload
    }

    pub fn info(&self) -> ArtifactInfo {
        ArtifactInfo {
            id: self.id,
            url: self.url.clone(),
            mime_type: self.payload.mime_type.clone(),
            size_bytes: self.payload.data.len(),
            chunk_count: self.chunk_count,
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Serializable summary of a pending artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInfo {
    pub id: Uuid,
    pub url: String,
    pub mime_type: String,
    pub size_bytes: usize,
    pub chunk_count: usize,
    /// ISO 8601 creation timestamp
    pub created_at: String,
}

#[cfg(test)]
#[path = "artifact_test.rs"]
mod tests;
