//! # Cairn View
//!
//! Lists the data assets of an identity and materializes their current
//! manifests into a renderable view.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`fetch_references`] lists the asset references once per mount.
//! 2. [`resolve_all`] downloads every manifest concurrently, absorbing
//!    per-item failures.
//! 3. [`AssetView`] settles into `Empty` or `Populated`.
//!
//! [`AssetSession`] wires the three together.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run<I: cairn_core::traits::AssetIndex>(index: I) {
//! use cairn_core::credential::Credential;
//! use cairn_view::{AssetSession, TracingNotifier};
//!
//! let mut session = AssetSession::new(index, Credential::new("token"), TracingNotifier);
//! if let Ok(view) = session.mount().await {
//!     println!("{:?}", view.state());
//! }
//! # }
//! ```

pub mod fetcher;
pub mod notify;
pub mod resolver;
pub mod session;
pub mod view;

#[cfg(test)]
mod test_support;

pub use fetcher::fetch_references;
pub use notify::{Deduplicated, MemoryNotifier, TracingNotifier};
pub use resolver::{Resolution, resolve_all};
pub use session::AssetSession;
pub use view::{AssetCard, AssetView, Rendered, UpdateRequest, ViewState};

pub mod prelude {
    pub use crate::fetcher::*;
    pub use crate::notify::*;
    pub use crate::resolver::*;
    pub use crate::session::*;
    pub use crate::view::*;
}
