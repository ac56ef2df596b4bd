//! SQL processing module
//!
//! This module provides:
//! - `types`: data types and literal values
//! - `schema`: table schemas and the catalog
//! - `ast`: statement definitions
//! - `production`: statement validation and SQL generation

pub mod ast;
pub mod production;
pub mod schema;
pub mod types;
