use crate::credential::Credential;
use crate::error::*;
use crate::manifest::AssetReference;

/// The remote index plus content-addressed gateway holding a user's data assets.
pub trait AssetIndex: Send + Sync + 'static {
    /// Lists the asset references owned by the credential's identity.
    fn list_references(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Vec<AssetReference>, IndexError>> + Send;

    /// Downloads the raw manifest stored under `content_id`.
    fn fetch_manifest(
        &self,
        credential: &Credential,
        content_id: &str,
    ) -> impl Future<Output = Result<serde_json::Value, ManifestError>> + Send;
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The listing started.
    Pending(String),
    Succeeded(String),
    Failed(String),
    /// A soft advisory. Advisories sharing a `key` are shown at most once.
    Advisory {
        key: Option<String>,
        message: String,
    },
}

/// Toast surface consuming notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}
