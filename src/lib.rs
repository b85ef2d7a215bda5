pub use cairn_core::*;

#[cfg(feature = "client")]
pub mod client {
    pub use cairn_client::*;
}

#[cfg(feature = "view")]
pub mod view {
    pub use cairn_view::*;
}

pub mod prelude {
    pub use cairn_core::prelude::*;

    #[cfg(feature = "client")]
    pub use cairn_client::{CairnClient, ClientConfig};

    #[cfg(feature = "view")]
    pub use cairn_view::prelude::*;
}
