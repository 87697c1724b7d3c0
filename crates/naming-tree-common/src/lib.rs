//! Common utilities for naming-tree.
//!
//! This crate provides shared infrastructure used by all naming-tree components:
//! - **Diagnostics** - colored terminal output for warnings and load failures
//! - **Fetching** - `http(s)://`, `file:`, `data:` and plain-path sources
//! - **URL resolution** - relative `src` attributes against a base URL

pub mod diagnostics;
pub mod net;
pub mod url;
