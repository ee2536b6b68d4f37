pub mod images;
pub mod layout;
pub mod navbar;

pub use images::*;
