//! Common modules shared between the Plonk verifier's decoding and
//! verification layers: the typed data model, the external object forms,
//! curve backends, and the custom-gate union.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod constants;
pub mod curves;
pub mod custom_serde;
pub mod gates;
pub mod types;
