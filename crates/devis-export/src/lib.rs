//! devis-export
//!
//! Document assembly (placeholder substitution + conditional sections) and
//! PDF rendering via headless Chromium.

pub mod assemble;
pub mod error;
pub mod pdf;
pub mod template;
