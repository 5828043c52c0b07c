mod ext;
mod http;
mod store;

pub use ext::HealthStoreExt;
pub use http::{create, HttpHealthStore};
pub use store::*;
