//! Database entities for the household ledger.
//!
//! Schema management lives in the `migration` crate; this crate only
//! defines the sea-orm entities and their relations.

pub mod entities;
