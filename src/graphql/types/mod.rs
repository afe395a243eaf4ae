//! GraphQL type definitions

pub mod analytics;
pub mod common;
pub mod sale;
pub mod sentiment;

pub use analytics::*;
pub use common::*;
pub use sale::*;
pub use sentiment::*;
