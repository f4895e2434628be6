//! Decoding of the external object forms into curve-native types.
//!
//! Decimal big-integer leaves parse through `BigUint`; scalar-field leaves
//! are canonicalised by reduction modulo the field order, and curve point
//! leaves go through the backend constructors. A failure here means the input
//! is not structurally a proof or key, and is the only way verification
//! surfaces an error to the caller: everything downstream of a clean decode
//! is an accept/reject decision.

use ark_ff::PrimeField;
use num_bigint::BigUint;

use crate::{
    curves::CurveBackend,
    gates::CustomGate,
    types::{CustomGateObject, Proof, ProofObject, VerificationKey, VerificationKeyObject},
};

/// An error that occurs while decoding an external object form
#[derive(Debug)]
pub enum DecodeError {
    /// A decimal big-integer leaf failed to parse; carries the field name
    InvalidScalar(&'static str),
    /// A curve point leaf had the wrong shape; carries the field name
    InvalidPoint(&'static str),
    /// The object declared a proof system other than "plonk"
    InvalidProtocol(String),
    /// A custom-gate entry named an id missing from the registry
    UnknownGate(String),
    /// A gate sub-proof failed its gate's decoder; carries the gate id
    GateProof(String),
    /// The proof's custom-gate entries do not line up with the key's Qk
    /// commitments
    GateCountMismatch {
        /// The number of Qk commitments in the verification key
        qk: usize,
        /// The number of custom-gate entries in the proof
        gates: usize,
    },
}

// ------------------
// | LEAF DECODING |
// ------------------

/// Decodes a decimal big-integer leaf
fn biguint_from_str(value: &str, field: &'static str) -> Result<BigUint, DecodeError> {
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or(DecodeError::InvalidScalar(field))
}

/// Decodes a scalar leaf, canonicalised by reduction modulo the field order
pub fn scalar_from_str<F: PrimeField>(value: &str, field: &'static str) -> Result<F, DecodeError> {
    let value = biguint_from_str(value, field)?;
    Ok(F::from_be_bytes_mod_order(&value.to_bytes_be()))
}

/// Decodes a G1 point leaf from its coordinate string array
pub fn g1_from_object<P: CurveBackend>(
    coords: &[String],
    field: &'static str,
) -> Result<P::G1Affine, DecodeError> {
    let coords = coords
        .iter()
        .map(|c| biguint_from_str(c, field))
        .collect::<Result<Vec<_>, _>>()?;

    P::g1_from_object(&coords).ok_or(DecodeError::InvalidPoint(field))
}

/// Decodes a G2 point leaf from its array of extension coordinate pairs
pub fn g2_from_object<P: CurveBackend>(
    coords: &[Vec<String>],
    field: &'static str,
) -> Result<P::G2Affine, DecodeError> {
    let coords = coords
        .iter()
        .map(|pair| {
            pair.iter()
                .map(|c| biguint_from_str(c, field))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    P::g2_from_object(&coords).ok_or(DecodeError::InvalidPoint(field))
}

/// Checks an object's declared proof system
fn check_protocol(protocol: Option<&String>) -> Result<(), DecodeError> {
    match protocol {
        Some(p) if p != "plonk" => Err(DecodeError::InvalidProtocol(p.clone())),
        _ => Ok(()),
    }
}

// --------------------
// | OBJECT DECODING |
// --------------------

/// Decodes a verification key from its external object form
pub fn decode_verification_key<P: CurveBackend>(
    object: &VerificationKeyObject,
) -> Result<VerificationKey<P>, DecodeError> {
    check_protocol(object.protocol.as_ref())?;

    let qk = object
        .qk
        .iter()
        .map(|coords| g1_from_object::<P>(coords, "Qk"))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VerificationKey {
        power: object.power,
        n_public: object.n_public,
        k1: scalar_from_str(&object.k1, "k1")?,
        k2: scalar_from_str(&object.k2, "k2")?,
        q_m: g1_from_object::<P>(&object.q_m, "Qm")?,
        q_l: g1_from_object::<P>(&object.q_l, "Ql")?,
        q_r: g1_from_object::<P>(&object.q_r, "Qr")?,
        q_o: g1_from_object::<P>(&object.q_o, "Qo")?,
        q_c: g1_from_object::<P>(&object.q_c, "Qc")?,
        s1: g1_from_object::<P>(&object.s1, "S1")?,
        s2: g1_from_object::<P>(&object.s2, "S2")?,
        s3: g1_from_object::<P>(&object.s3, "S3")?,
        x_2: g2_from_object::<P>(&object.x_2, "X_2")?,
        qk,
    })
}

/// Decodes the custom-gate entries of a proof, enforcing the gate contract:
/// gates are in use iff the proof carries entries, in which case they must
/// line up one-to-one with the key's Qk commitments.
fn decode_custom_gates(
    entries: &[CustomGateObject],
    qk_len: usize,
) -> Result<Vec<CustomGate>, DecodeError> {
    if entries.len() != qk_len {
        return Err(DecodeError::GateCountMismatch {
            qk: qk_len,
            gates: entries.len(),
        });
    }

    entries
        .iter()
        .map(|entry| CustomGate::decode(&entry.id, &entry.proof))
        .collect()
}

/// Decodes a proof from its external object form, including its custom-gate
/// entries, which must match the verification key's Qk commitments in number
/// and order
pub fn decode_proof<P: CurveBackend>(
    object: &ProofObject,
    vkey: &VerificationKey<P>,
) -> Result<Proof<P>, DecodeError> {
    check_protocol(object.protocol.as_ref())?;

    let custom_gates = decode_custom_gates(&object.custom_gates, vkey.qk.len())?;

    Ok(Proof {
        a: g1_from_object::<P>(&object.a, "A")?,
        b: g1_from_object::<P>(&object.b, "B")?,
        c: g1_from_object::<P>(&object.c, "C")?,
        z: g1_from_object::<P>(&object.z, "Z")?,
        t1: g1_from_object::<P>(&object.t1, "T1")?,
        t2: g1_from_object::<P>(&object.t2, "T2")?,
        t3: g1_from_object::<P>(&object.t3, "T3")?,
        w_xi: g1_from_object::<P>(&object.w_xi, "Wxi")?,
        w_xi_omega: g1_from_object::<P>(&object.w_xi_omega, "Wxiw")?,
        eval_a: scalar_from_str(&object.eval_a, "eval_a")?,
        eval_b: scalar_from_str(&object.eval_b, "eval_b")?,
        eval_c: scalar_from_str(&object.eval_c, "eval_c")?,
        eval_s1: scalar_from_str(&object.eval_s1, "eval_s1")?,
        eval_s2: scalar_from_str(&object.eval_s2, "eval_s2")?,
        eval_zw: scalar_from_str(&object.eval_zw, "eval_zw")?,
        eval_r: scalar_from_str(&object.eval_r, "eval_r")?,
        custom_gates,
    })
}

/// Decodes the public signals, canonicalised into the scalar field by
/// reduction modulo its order
pub fn decode_public_signals<F: PrimeField>(signals: &[String]) -> Result<Vec<F>, DecodeError> {
    signals
        .iter()
        .map(|signal| scalar_from_str(signal, "publicSignals"))
        .collect()
}
