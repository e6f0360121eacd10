pub mod error;
pub mod key;
pub mod store;
pub mod testing;

pub use error::StateError;
pub use key::{REPORTS_KEY, StateKey};
pub use store::StateStore;
