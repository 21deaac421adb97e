//! # casegen-core
//!
//! Core types, id validation, and error types for casegen.
//!
//! This crate provides the foundational types shared across all casegen crates:
//! - Entity structs for the generation pipeline (requirements, compliance
//!   snippets, test cases and their steps)
//! - The `Priority` enum with case-insensitive parsing
//! - Identifier format checks
//! - Construction-time validation errors
//! - Response types rendered by the CLI

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
