//! sqlcrud - semantic validation and SQL generation for CRUD statements
//!
//! This crate provides:
//! - An in-memory schema catalog (tables, columns, declared types)
//! - One production per statement kind (SELECT, INSERT, UPDATE, DELETE)
//!   that validates references and value types, then renders SQL text
//! - Literal typing, compatibility and formatting helpers
//!
//! Validation failures never surface as `Err`: they are collected in the
//! returned `Attribute` together with the generated code.

pub mod error;
pub mod sql;
