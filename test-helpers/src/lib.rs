//! Common helper functions used in unit and integration tests across the
//! verifier crates

pub mod proof_system;
