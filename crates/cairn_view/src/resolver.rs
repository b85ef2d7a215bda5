use crate::notify::manifest_advisory;
use cairn_core::prelude::*;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{debug, info, warn};

/// The settled outcome of one manifest request.
#[derive(Debug)]
enum Outcome {
    Accepted(ManifestDocument),
    /// Empty or legacy manifest whose `data_stream` is missing or falsy.
    Skipped(String),
    Failed(ManifestError),
}

/// What a batch of manifest requests produced once every request settled.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Accepted documents, in completion order.
    pub documents: Vec<ManifestDocument>,
    /// Number of manifest requests issued.
    pub dispatched: usize,
    /// Content ids of manifests without a usable `data_stream`.
    pub skipped: Vec<String>,
    pub failed: Vec<ManifestError>,
}

async fn resolve_one<I: AssetIndex>(
    index: &I,
    credential: &Credential,
    reference: &AssetReference,
    manifest_cid: &str,
) -> Outcome {
    let raw = match index.fetch_manifest(credential, manifest_cid).await {
        Ok(raw) => raw,
        Err(err) => return Outcome::Failed(err),
    };

    match ManifestDocument::from_raw(raw) {
        Ok(Some(document)) => Outcome::Accepted(document.stamped(reference, manifest_cid)),
        Ok(None) => Outcome::Skipped(manifest_cid.to_string()),
        Err(e) => Outcome::Failed(ManifestError::new(
            manifest_cid,
            format!("malformed manifest: {e}"),
        )),
    }
}

/// Downloads the manifest of every reference concurrently and waits for all of
/// them to settle.
///
/// A failed request never cancels its siblings: it is logged, advised to the
/// user through `notifier` and recorded in [`Resolution::failed`].
pub async fn resolve_all<I, N>(
    index: &I,
    credential: &Credential,
    references: &[AssetReference],
    notifier: &N,
) -> Resolution
where
    I: AssetIndex,
    N: Notifier + ?Sized,
{
    let mut resolution = Resolution::default();
    let mut pending = FuturesUnordered::new();

    for reference in references {
        let manifest_cid = reference.manifest_cid().unwrap_or_default();
        if manifest_cid.is_empty() {
            warn!("Asset reference {} has no manifest id", reference.file_name);
        }
        pending.push(resolve_one(index, credential, reference, manifest_cid));
    }
    resolution.dispatched = pending.len();

    while let Some(outcome) = pending.next().await {
        match outcome {
            Outcome::Accepted(document) => resolution.documents.push(document),
            Outcome::Skipped(cid) => {
                debug!("Manifest file is empty or wrong format: {cid}");
                resolution.skipped.push(cid);
            }
            Outcome::Failed(err) => {
                warn!("Error downloading manifest file: {err}");
                notifier.notify(manifest_advisory());
                resolution.failed.push(err);
            }
        }
    }

    info!(
        "Resolved {} of {} manifests ({} skipped, {} failed)",
        resolution.documents.len(),
        resolution.dispatched,
        resolution.skipped.len(),
        resolution.failed.len()
    );

    resolution
}
