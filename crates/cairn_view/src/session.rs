use crate::fetcher::fetch_references;
use crate::notify::Deduplicated;
use crate::resolver::resolve_all;
use crate::view::{AssetView, UpdateRequest};
use cairn_core::prelude::*;
use tracing::{debug, info};

/// One rendering session: the index, the host's credential and toast surface,
/// and the view being materialized.
pub struct AssetSession<I, N> {
    index: I,
    credential: Credential,
    notifier: Deduplicated<N>,
    references: Option<Vec<AssetReference>>,
    view: AssetView,
}

impl<I: AssetIndex, N: Notifier> AssetSession<I, N> {
    pub fn new(index: I, credential: Credential, notifier: N) -> Self {
        Self {
            index,
            credential,
            notifier: Deduplicated::new(notifier),
            references: None,
            view: AssetView::loading(),
        }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn notifier(&self) -> &N {
        self.notifier.inner()
    }

    pub fn view(&self) -> &AssetView {
        &self.view
    }

    /// The references of the last successful listing.
    pub fn references(&self) -> Option<&[AssetReference]> {
        self.references.as_deref()
    }

    /// Lists the references, resolves their manifests and settles the view.
    ///
    /// Does nothing once references are cached. A listing failure settles the
    /// view as empty and is returned; manifest failures never are.
    pub async fn mount(&mut self) -> Result<&AssetView, IndexError> {
        if self.references.is_some() {
            debug!("References already fetched, skipping mount");
            return Ok(&self.view);
        }

        self.view = AssetView::loading();

        let references =
            match fetch_references(&self.index, &self.credential, &self.notifier).await {
                Ok(references) => references,
                Err(err) => {
                    self.view.settle(Vec::new());
                    return Err(err);
                }
            };

        let documents = if references.is_empty() {
            info!("No asset references, skipping manifest resolution");
            Vec::new()
        } else {
            resolve_all(&self.index, &self.credential, &references, &self.notifier)
                .await
                .documents
        };

        self.references = Some(references);
        self.view.settle(documents);
        Ok(&self.view)
    }

    /// Drops the cached references and runs a fresh mount.
    pub async fn remount(&mut self) -> Result<&AssetView, IndexError> {
        self.references = None;
        self.notifier.reset();
        self.mount().await
    }

    pub fn select(&self, position: usize) -> Option<UpdateRequest> {
        self.view.select(position)
    }
}
