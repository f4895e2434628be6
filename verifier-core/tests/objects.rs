//! End-to-end tests over the external object forms: decode, dispatch, verify

use ark_bls12_381::Bls12_381;
use ark_bn254::{Bn254, Fr};
use ark_ff::One;
use ark_std::test_rng;
use serde_json::Value;

use test_helpers::proof_system::{
    proof_to_object, signals_to_object, simulated_proof, simulated_setup, vkey_to_object,
};
use verifier_common::{
    custom_serde::DecodeError,
    gates::CustomGate,
    types::{CustomGateObject, ProofObject, VerificationKeyObject},
};
use verifier_core::verifier::{errors::VerifierError, verify_proof};

const POWER: u32 = 3;

/// Builds an accepting BN254 object-form fixture with one public signal
fn bn254_fixture() -> (VerificationKeyObject, Vec<String>, ProofObject) {
    let mut rng = test_rng();
    let setup = simulated_setup::<Bn254, _>(POWER, 1, 0, &mut rng);
    let public_inputs = [Fr::from(9u64)];
    let proof = simulated_proof(&setup, &public_inputs, Vec::new(), &mut rng);

    (
        vkey_to_object(&setup.vkey),
        signals_to_object(&public_inputs),
        proof_to_object(&proof),
    )
}

#[test]
fn test_object_form_accepts_bn254() {
    let (vkey, signals, proof) = bn254_fixture();
    assert!(verify_proof(&vkey, &signals, &proof).unwrap());
}

#[test]
fn test_object_form_accepts_bls12_381() {
    let mut rng = test_rng();
    let setup = simulated_setup::<Bls12_381, _>(POWER, 3, 0, &mut rng);
    let public_inputs = [
        ark_bls12_381::Fr::from(1u64),
        ark_bls12_381::Fr::from(2u64),
        ark_bls12_381::Fr::from(3u64),
    ];
    let proof = simulated_proof(&setup, &public_inputs, Vec::new(), &mut rng);

    let accepted = verify_proof(
        &vkey_to_object(&setup.vkey),
        &signals_to_object(&public_inputs),
        &proof_to_object(&proof),
    )
    .unwrap();
    assert!(accepted);
}

#[test]
fn test_object_form_survives_json_round_trip() {
    let (vkey, signals, proof) = bn254_fixture();

    let vkey: VerificationKeyObject =
        serde_json::from_str(&serde_json::to_string(&vkey).unwrap()).unwrap();
    let proof: ProofObject =
        serde_json::from_str(&serde_json::to_string(&proof).unwrap()).unwrap();

    assert!(verify_proof(&vkey, &signals, &proof).unwrap());
}

#[test]
fn test_object_form_rejects_wrong_public_signal() {
    let (vkey, _, proof) = bn254_fixture();
    assert!(!verify_proof(&vkey, &["10".to_string()], &proof).unwrap());
}

#[test]
fn test_object_form_rejects_empty_public_signals() {
    let (vkey, _, proof) = bn254_fixture();
    assert!(!verify_proof(&vkey, &[], &proof).unwrap());
}

#[test]
fn test_object_form_rejects_incremented_linearisation_eval() {
    let mut rng = test_rng();
    let setup = simulated_setup::<Bn254, _>(POWER, 1, 0, &mut rng);
    let public_inputs = [Fr::from(9u64)];
    let mut proof = simulated_proof(&setup, &public_inputs, Vec::new(), &mut rng);
    proof.eval_r += Fr::one();

    let accepted = verify_proof(
        &vkey_to_object(&setup.vkey),
        &signals_to_object(&public_inputs),
        &proof_to_object(&proof),
    )
    .unwrap();
    assert!(!accepted);
}

#[test]
fn test_object_form_rejects_zero_point() {
    let (vkey, signals, mut proof) = bn254_fixture();
    proof.a = vec!["0".to_string(), "0".to_string(), "1".to_string()];

    // (0, 0) decodes but fails the on-curve test; an algebraic rejection,
    // not a decode error
    assert!(!verify_proof(&vkey, &signals, &proof).unwrap());
}

#[test]
fn test_object_form_rejects_oversized_domain_exponent() {
    let (mut vkey, signals, proof) = bn254_fixture();
    vkey.power = 200;

    // Algebraic rejection, not a decode error and not a panic
    assert!(!verify_proof(&vkey, &signals, &proof).unwrap());
}

#[test]
fn test_object_form_unknown_curve_is_an_error() {
    let (mut vkey, signals, proof) = bn254_fixture();
    vkey.curve = "bw6-761".to_string();

    assert!(matches!(
        verify_proof(&vkey, &signals, &proof),
        Err(VerifierError::UnsupportedCurve(_))
    ));
}

#[test]
fn test_object_form_wrong_protocol_is_malformed() {
    let (mut vkey, signals, proof) = bn254_fixture();
    vkey.protocol = Some("groth16".to_string());

    assert!(matches!(
        verify_proof(&vkey, &signals, &proof),
        Err(VerifierError::Malformed(DecodeError::InvalidProtocol(_)))
    ));
}

#[test]
fn test_object_form_bad_decimal_is_malformed() {
    let (vkey, signals, mut proof) = bn254_fixture();
    proof.eval_a = "0x1234".to_string();

    assert!(matches!(
        verify_proof(&vkey, &signals, &proof),
        Err(VerifierError::Malformed(DecodeError::InvalidScalar(_)))
    ));
}

#[test]
fn test_object_form_unknown_gate_is_malformed() {
    let mut rng = test_rng();
    let setup = simulated_setup::<Bn254, _>(POWER, 1, 1, &mut rng);
    let public_inputs = [Fr::from(9u64)];
    let proof = simulated_proof(
        &setup,
        &public_inputs,
        vec![CustomGate::Identity],
        &mut rng,
    );

    let mut proof = proof_to_object(&proof);
    proof.custom_gates[0].id = "range16".to_string();

    assert!(matches!(
        verify_proof(
            &vkey_to_object(&setup.vkey),
            &signals_to_object(&public_inputs),
            &proof
        ),
        Err(VerifierError::Malformed(DecodeError::UnknownGate(_)))
    ));
}

#[test]
fn test_object_form_gate_count_mismatch_is_malformed() {
    let (vkey, signals, mut proof) = bn254_fixture();

    // The key carries no Qk commitments, so a proof with a gate entry is
    // malformed rather than rejected
    proof.custom_gates.push(CustomGateObject {
        id: "identity".to_string(),
        proof: Value::Null,
    });

    assert!(matches!(
        verify_proof(&vkey, &signals, &proof),
        Err(VerifierError::Malformed(
            DecodeError::GateCountMismatch { qk: 0, gates: 1 }
        ))
    ));
}

#[test]
fn test_object_form_accepts_identity_gate() {
    let mut rng = test_rng();
    let setup = simulated_setup::<Bn254, _>(POWER, 1, 1, &mut rng);
    let public_inputs = [Fr::from(9u64)];
    let proof = simulated_proof(
        &setup,
        &public_inputs,
        vec![CustomGate::Identity],
        &mut rng,
    );

    let accepted = verify_proof(
        &vkey_to_object(&setup.vkey),
        &signals_to_object(&public_inputs),
        &proof_to_object(&proof),
    )
    .unwrap();
    assert!(accepted);
}
