//! Constants that parameterize the Plonk proof system

/// The number of bytes in a hash digest used by the transcript
pub const HASH_OUTPUT_SIZE: usize = 32;

/// The number of opening batching challenges derived from the transcript.
///
/// The first is squeezed from the hash state; the rest are its increasing
/// powers.
pub const NUM_V_CHALLENGES: usize = 6;
