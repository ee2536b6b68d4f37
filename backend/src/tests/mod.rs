pub mod helpers;
pub mod integration;

pub use helpers::TestContext;
