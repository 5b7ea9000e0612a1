//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod build_catalog;
pub mod execute_method;
pub mod normalize;
