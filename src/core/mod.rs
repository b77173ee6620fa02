pub mod error;
pub mod id;

pub use error::{Result, ShoppingError};
pub use id::{Id, IdGenerator};
