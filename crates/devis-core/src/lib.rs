//! devis-core
//!
//! Pure domain logic for quote documents: the loosely-typed quote input
//! model, the derivation engine that turns a quote into display fields and
//! section flags, and French-locale formatting helpers. No I/O — everything
//! here is request-scoped, synchronous computation.

pub mod config;
pub mod derive;
pub mod format;
pub mod models;
