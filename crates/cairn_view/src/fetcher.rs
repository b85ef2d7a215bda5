use crate::notify::{FETCH_FAILED, FETCH_PENDING, FETCH_SUCCEEDED, index_advisory};
use cairn_core::prelude::*;
use tracing::{error, info};

/// Lists the references of `credential`'s identity, wrapped in the pending /
/// succeeded / failed notice triple.
///
/// The references are returned exactly as the index sent them. A failure is
/// advised to the user and returned; it is never retried.
pub async fn fetch_references<I, N>(
    index: &I,
    credential: &Credential,
    notifier: &N,
) -> Result<Vec<AssetReference>, IndexError>
where
    I: AssetIndex,
    N: Notifier + ?Sized,
{
    notifier.notify(Notice::Pending(FETCH_PENDING.to_string()));

    match index.list_references(credential).await {
        Ok(references) => {
            info!("Data assets fetched: {} references", references.len());
            notifier.notify(Notice::Succeeded(FETCH_SUCCEEDED.to_string()));
            Ok(references)
        }
        Err(err) => {
            error!("Error fetching data assets: {err}");
            notifier.notify(Notice::Advisory {
                key: None,
                message: index_advisory(&err),
            });
            notifier.notify(Notice::Failed(FETCH_FAILED.to_string()));
            Err(err)
        }
    }
}
