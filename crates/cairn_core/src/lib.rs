pub mod credential;
pub mod error;
pub mod manifest;
pub mod traits;

pub mod prelude {
    pub use super::credential::*;
    pub use super::error::*;
    pub use super::manifest::*;
    pub use super::traits::*;
}
