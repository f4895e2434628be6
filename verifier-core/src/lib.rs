//! The Plonk proof verification algorithm, defined agnostically of the
//! pairing curve and the transcript hash implementation.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod serde;
pub mod transcript;
pub mod verifier;
