use cairn_core::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;

pub fn reference(folder: &str, manifest: &str, file_name: &str) -> AssetReference {
    AssetReference {
        file_name: file_name.to_string(),
        folder_cid: folder.to_string(),
        hash: Some(manifest.to_string()),
        mime_type: Some("application/json".to_string()),
        ..Default::default()
    }
}

pub fn valid_manifest(name: &str) -> serde_json::Value {
    json!({
        "data_stream": {
            "name": name,
            "creator": "erd1creator",
            "created_on": "2024-01-01T00:00:00Z",
            "last_modified_on": "2024-01-02T00:00:00Z",
            "marshalManifest": { "totalItems": 2, "nestedStream": false }
        },
        "data": [{ "idx": 1 }, { "idx": 2 }],
        "version": 1
    })
}

/// In-memory index: manifests not registered fail as not yet pinned.
pub struct FakeIndex {
    listing: Result<Vec<AssetReference>, IndexError>,
    manifests: HashMap<String, serde_json::Value>,
    list_calls: AtomicUsize,
    manifest_requests: AtomicUsize,
    rendezvous: Option<Arc<Barrier>>,
}

impl FakeIndex {
    pub fn listing(references: Vec<AssetReference>) -> Self {
        Self {
            listing: Ok(references),
            manifests: HashMap::new(),
            list_calls: AtomicUsize::new(0),
            manifest_requests: AtomicUsize::new(0),
            rendezvous: None,
        }
    }

    pub fn failing(err: IndexError) -> Self {
        Self {
            listing: Err(err),
            ..Self::listing(Vec::new())
        }
    }

    pub fn with_manifest(mut self, cid: &str, raw: serde_json::Value) -> Self {
        self.manifests.insert(cid.to_string(), raw);
        self
    }

    /// Holds every manifest request until `parties` requests are in flight.
    pub fn with_rendezvous(mut self, parties: usize) -> Self {
        self.rendezvous = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn credential(&self) -> Credential {
        Credential::new("test-token")
    }

    pub fn references(&self) -> Vec<AssetReference> {
        self.listing.clone().unwrap_or_default()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn manifest_requests(&self) -> usize {
        self.manifest_requests.load(Ordering::SeqCst)
    }
}

impl AssetIndex for FakeIndex {
    async fn list_references(
        &self,
        _credential: &Credential,
    ) -> Result<Vec<AssetReference>, IndexError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.listing.clone()
    }

    async fn fetch_manifest(
        &self,
        _credential: &Credential,
        content_id: &str,
    ) -> Result<serde_json::Value, ManifestError> {
        self.manifest_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }
        self.manifests
            .get(content_id)
            .cloned()
            .ok_or_else(|| ManifestError::new(content_id, "not pinned yet"))
    }
}
