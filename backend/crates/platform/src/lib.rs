//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Instructor passcode verification (constant-time, digest based)
//! - Minimal CSV encoding for flat exports

pub mod csv;
pub mod passcode;
