//! Domain Models
//!
//! Entities as stored in the provider's relational tables.

pub mod document;
pub mod merchant;
pub mod organization;
pub mod user;

pub use document::Document;
pub use merchant::{Merchant, MerchantStatus, StandType};
pub use organization::Organization;
pub use user::{Role, UserInfo};
