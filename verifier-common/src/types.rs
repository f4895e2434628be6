//! Common types used throughout the verifier.
//!
//! Two families live here: the typed, curve-native proof and key structures
//! the verification algorithm operates on, and the external object forms
//! those are decoded from. Object forms mirror the upstream artifact format:
//! nested records whose leaves are decimal big-integer strings.

use ark_ec::pairing::Pairing;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{constants::NUM_V_CHALLENGES, gates::CustomGate};

/// Preprocessed information derived from the circuit definition and the
/// universal SRS, used by the verifier. Never mutated after decoding.
#[derive(Clone, Debug)]
pub struct VerificationKey<P: Pairing> {
    /// Domain size exponent; the circuit evaluation domain has 2^power
    /// elements
    pub power: u32,
    /// The number of public inputs to the circuit
    pub n_public: usize,
    /// The first coset generator of the permutation argument
    pub k1: P::ScalarField,
    /// The second coset generator of the permutation argument
    pub k2: P::ScalarField,
    /// The commitment to the multiplication selector polynomial
    pub q_m: P::G1Affine,
    /// The commitment to the left-wire selector polynomial
    pub q_l: P::G1Affine,
    /// The commitment to the right-wire selector polynomial
    pub q_r: P::G1Affine,
    /// The commitment to the output-wire selector polynomial
    pub q_o: P::G1Affine,
    /// The commitment to the constant selector polynomial
    pub q_c: P::G1Affine,
    /// The commitment to the first permutation polynomial
    pub s1: P::G1Affine,
    /// The commitment to the second permutation polynomial
    pub s2: P::G1Affine,
    /// The commitment to the third permutation polynomial
    pub s3: P::G1Affine,
    /// The G2 commitment to the secret evaluation point of the SRS
    pub x_2: P::G2Affine,
    /// Custom-gate selector commitments, one per registered gate; empty for
    /// circuits without custom gates
    pub qk: Vec<P::G1Affine>,
}

/// A Plonk proof. Never mutated after decoding.
#[derive(Clone, Debug)]
pub struct Proof<P: Pairing> {
    /// The commitment to the left wire polynomial
    pub a: P::G1Affine,
    /// The commitment to the right wire polynomial
    pub b: P::G1Affine,
    /// The commitment to the output wire polynomial
    pub c: P::G1Affine,
    /// The commitment to the grand product polynomial encoding the
    /// permutation argument
    pub z: P::G1Affine,
    /// The commitment to the low split of the quotient polynomial
    pub t1: P::G1Affine,
    /// The commitment to the middle split of the quotient polynomial
    pub t2: P::G1Affine,
    /// The commitment to the high split of the quotient polynomial
    pub t3: P::G1Affine,
    /// The opening proof of evaluations at the challenge point ξ
    pub w_xi: P::G1Affine,
    /// The opening proof of evaluations at the shifted point ξ·ω
    pub w_xi_omega: P::G1Affine,
    /// The left wire polynomial evaluated at ξ
    pub eval_a: P::ScalarField,
    /// The right wire polynomial evaluated at ξ
    pub eval_b: P::ScalarField,
    /// The output wire polynomial evaluated at ξ
    pub eval_c: P::ScalarField,
    /// The first permutation polynomial evaluated at ξ
    pub eval_s1: P::ScalarField,
    /// The second permutation polynomial evaluated at ξ
    pub eval_s2: P::ScalarField,
    /// The grand product polynomial evaluated at ξ·ω
    pub eval_zw: P::ScalarField,
    /// The linearisation polynomial evaluated at ξ
    pub eval_r: P::ScalarField,
    /// Decoded custom-gate instances, in the order of the key's `qk`
    /// commitments; empty for proofs without custom gates
    pub custom_gates: Vec<CustomGate>,
}

/// The public coin challenges used throughout the Plonk protocol, obtained
/// via the Fiat-Shamir transformation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenges<F> {
    /// The first permutation challenge
    pub beta: F,
    /// The second permutation challenge
    pub gamma: F,
    /// The quotient challenge
    pub alpha: F,
    /// The evaluation challenge
    pub xi: F,
    /// Increasing powers of the opening batching challenge: `v[i]` is the
    /// squeezed challenge raised to the power i + 1
    pub v: [F; NUM_V_CHALLENGES],
    /// The multipoint evaluation challenge
    pub u: F,
}

/// The external object form of a verification key.
///
/// G1 leaves are arrays of 2 (affine) or 3 (Jacobian) decimal coordinate
/// strings; G2 leaves are arrays of 2-element extension-field coordinate
/// pairs. Unknown fields are ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationKeyObject {
    /// The proof system identifier; must be "plonk" when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// The curve name, used for backend dispatch
    pub curve: String,
    /// Domain size exponent
    pub power: u32,
    /// The number of public inputs to the circuit
    #[serde(rename = "nPublic")]
    pub n_public: usize,
    /// The first coset generator of the permutation argument
    pub k1: String,
    /// The second coset generator of the permutation argument
    pub k2: String,
    /// The commitment to the multiplication selector polynomial
    #[serde(rename = "Qm")]
    pub q_m: Vec<String>,
    /// The commitment to the left-wire selector polynomial
    #[serde(rename = "Ql")]
    pub q_l: Vec<String>,
    /// The commitment to the right-wire selector polynomial
    #[serde(rename = "Qr")]
    pub q_r: Vec<String>,
    /// The commitment to the output-wire selector polynomial
    #[serde(rename = "Qo")]
    pub q_o: Vec<String>,
    /// The commitment to the constant selector polynomial
    #[serde(rename = "Qc")]
    pub q_c: Vec<String>,
    /// The commitment to the first permutation polynomial
    #[serde(rename = "S1")]
    pub s1: Vec<String>,
    /// The commitment to the second permutation polynomial
    #[serde(rename = "S2")]
    pub s2: Vec<String>,
    /// The commitment to the third permutation polynomial
    #[serde(rename = "S3")]
    pub s3: Vec<String>,
    /// The G2 commitment to the secret evaluation point of the SRS
    #[serde(rename = "X_2")]
    pub x_2: Vec<Vec<String>>,
    /// Custom-gate selector commitments, absent for circuits without custom
    /// gates
    #[serde(rename = "Qk", default, skip_serializing_if = "Vec::is_empty")]
    pub qk: Vec<Vec<String>>,
}

/// The external object form of a proof.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProofObject {
    /// The proof system identifier; must be "plonk" when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// The curve name recorded by the prover; informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    /// The commitment to the left wire polynomial
    #[serde(rename = "A")]
    pub a: Vec<String>,
    /// The commitment to the right wire polynomial
    #[serde(rename = "B")]
    pub b: Vec<String>,
    /// The commitment to the output wire polynomial
    #[serde(rename = "C")]
    pub c: Vec<String>,
    /// The commitment to the grand product polynomial
    #[serde(rename = "Z")]
    pub z: Vec<String>,
    /// The commitment to the low split of the quotient polynomial
    #[serde(rename = "T1")]
    pub t1: Vec<String>,
    /// The commitment to the middle split of the quotient polynomial
    #[serde(rename = "T2")]
    pub t2: Vec<String>,
    /// The commitment to the high split of the quotient polynomial
    #[serde(rename = "T3")]
    pub t3: Vec<String>,
    /// The opening proof at ξ
    #[serde(rename = "Wxi")]
    pub w_xi: Vec<String>,
    /// The opening proof at ξ·ω
    #[serde(rename = "Wxiw")]
    pub w_xi_omega: Vec<String>,
    /// The left wire polynomial evaluated at ξ
    pub eval_a: String,
    /// The right wire polynomial evaluated at ξ
    pub eval_b: String,
    /// The output wire polynomial evaluated at ξ
    pub eval_c: String,
    /// The first permutation polynomial evaluated at ξ
    pub eval_s1: String,
    /// The second permutation polynomial evaluated at ξ
    pub eval_s2: String,
    /// The grand product polynomial evaluated at ξ·ω
    pub eval_zw: String,
    /// The linearisation polynomial evaluated at ξ
    pub eval_r: String,
    /// Custom-gate entries, in the order of the key's `Qk` commitments;
    /// absent for proofs without custom gates
    #[serde(rename = "customGates", default, skip_serializing_if = "Vec::is_empty")]
    pub custom_gates: Vec<CustomGateObject>,
}

/// One custom-gate entry of a proof's object form
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomGateObject {
    /// The registry identifier of the gate
    pub id: String,
    /// The gate-specific sub-proof payload, decoded by the gate's own decoder
    #[serde(default)]
    pub proof: Value,
}
