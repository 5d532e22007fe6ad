pub mod api;
pub mod router;
pub mod session;

pub use crate::domain::model::*;
pub use crate::domain::ports::{ConfigProvider, Page, TokenStore};
pub use crate::utils::error::Result;
