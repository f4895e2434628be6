//! The transcript used to derive verification challenges via the Fiat-Shamir
//! transformation.
//!
//! Each challenge is the hash of one densely packed byte buffer: scalars in
//! fixed-width big-endian form, curve points uncompressed affine. The hash is
//! Keccak-256 in its original padding variant, and each digest is interpreted
//! big-endian and reduced into the scalar field. Buffer writes are never
//! reordered; the schedule below is what binds the verifier to every prover
//! message before a challenge depending on it is released.

use core::marker::PhantomData;

use ark_ff::PrimeField;
use sha3::{Digest, Keccak256};

use verifier_common::{
    constants::{HASH_OUTPUT_SIZE, NUM_V_CHALLENGES},
    curves::CurveBackend,
    types::{Challenges, Proof},
};

use crate::serde::scalar_to_bytes_be;

/// A hashing backend for the Fiat-Shamir transform
pub trait TranscriptHasher {
    /// Computes a 32-byte digest of the input
    fn hash(input: &[u8]) -> [u8; HASH_OUTPUT_SIZE];
}

/// Keccak-256 with the original 0x01 padding byte, as used by on-chain
/// verifiers. Not the NIST SHA3-256 variant.
pub struct Keccak256Hasher;

impl TranscriptHasher for Keccak256Hasher {
    fn hash(input: &[u8]) -> [u8; HASH_OUTPUT_SIZE] {
        let mut hasher = Keccak256::new();
        hasher.update(input);
        hasher.finalize().into()
    }
}

/// Accumulates prover messages into the buffer for the next challenge
pub struct Transcript<P: CurveBackend, H: TranscriptHasher> {
    /// The byte buffer of the challenge block currently being built
    buffer: Vec<u8>,
    /// Binds the curve backend and hasher choices
    _marker: PhantomData<(P, H)>,
}

impl<P: CurveBackend, H: TranscriptHasher> Transcript<P, H> {
    /// Creates a transcript with an empty buffer
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Transcript {
            buffer: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Appends a scalar in fixed-width big-endian form
    fn append_scalar(&mut self, scalar: &P::ScalarField) {
        self.buffer.extend(scalar_to_bytes_be(scalar));
    }

    /// Appends a curve point in uncompressed affine form
    fn append_point(&mut self, point: &P::G1Affine) {
        self.buffer.extend(P::g1_to_uncompressed_be(point));
    }

    /// Hashes the accumulated buffer into a scalar by big-endian reduction,
    /// and resets the buffer for the next challenge block
    fn squeeze_challenge(&mut self) -> P::ScalarField {
        let digest = H::hash(&self.buffer);
        self.buffer.clear();

        P::ScalarField::from_be_bytes_mod_order(&digest)
    }

    /// Computes all the challenges used in the Plonk protocol, given a proof
    /// and the public inputs it was produced for
    pub fn compute_challenges(
        &mut self,
        proof: &Proof<P>,
        public_inputs: &[P::ScalarField],
    ) -> Challenges<P::ScalarField> {
        // beta binds the public inputs and the wire commitments
        for input in public_inputs {
            self.append_scalar(input);
        }
        self.append_point(&proof.a);
        self.append_point(&proof.b);
        self.append_point(&proof.c);
        let beta = self.squeeze_challenge();

        // gamma binds beta alone
        self.append_scalar(&beta);
        let gamma = self.squeeze_challenge();

        // alpha binds the grand product commitment
        self.append_point(&proof.z);
        let alpha = self.squeeze_challenge();

        // xi binds the split quotient commitments
        self.append_point(&proof.t1);
        self.append_point(&proof.t2);
        self.append_point(&proof.t3);
        let xi = self.squeeze_challenge();

        // The first opening challenge binds every claimed evaluation; the
        // rest are its increasing powers
        self.append_scalar(&proof.eval_a);
        self.append_scalar(&proof.eval_b);
        self.append_scalar(&proof.eval_c);
        self.append_scalar(&proof.eval_s1);
        self.append_scalar(&proof.eval_s2);
        self.append_scalar(&proof.eval_zw);
        self.append_scalar(&proof.eval_r);
        let mut v = [self.squeeze_challenge(); NUM_V_CHALLENGES];
        for i in 1..NUM_V_CHALLENGES {
            v[i] = v[0] * v[i - 1];
        }

        // u binds the opening proofs
        self.append_point(&proof.w_xi);
        self.append_point(&proof.w_xi_omega);
        let u = self.squeeze_challenge();

        Challenges {
            beta,
            gamma,
            alpha,
            xi,
            v,
            u,
        }
    }
}

#[cfg(test)]
/// Tests for the transcript module.
pub mod tests {
    use ark_bn254::{Bn254, Fr, G1Affine};
    use ark_ec::AffineRepr;
    use ark_ff::{Field, UniformRand};
    use ark_std::test_rng;

    use verifier_common::types::Proof;

    use super::{Keccak256Hasher, Transcript};

    /// Builds a structurally arbitrary proof for transcript tests
    pub fn random_proof() -> Proof<Bn254> {
        let mut rng = test_rng();
        Proof {
            a: G1Affine::rand(&mut rng),
            b: G1Affine::rand(&mut rng),
            c: G1Affine::rand(&mut rng),
            z: G1Affine::rand(&mut rng),
            t1: G1Affine::rand(&mut rng),
            t2: G1Affine::rand(&mut rng),
            t3: G1Affine::rand(&mut rng),
            w_xi: G1Affine::rand(&mut rng),
            w_xi_omega: G1Affine::rand(&mut rng),
            eval_a: Fr::rand(&mut rng),
            eval_b: Fr::rand(&mut rng),
            eval_c: Fr::rand(&mut rng),
            eval_s1: Fr::rand(&mut rng),
            eval_s2: Fr::rand(&mut rng),
            eval_zw: Fr::rand(&mut rng),
            eval_r: Fr::rand(&mut rng),
            custom_gates: Vec::new(),
        }
    }

    #[test]
    fn test_challenges_are_deterministic() {
        let mut rng = test_rng();
        let proof = random_proof();
        let public_inputs = [Fr::rand(&mut rng), Fr::rand(&mut rng)];

        let first = Transcript::<Bn254, Keccak256Hasher>::new()
            .compute_challenges(&proof, &public_inputs);
        let second = Transcript::<Bn254, Keccak256Hasher>::new()
            .compute_challenges(&proof, &public_inputs);

        assert_eq!(first, second);
    }

    #[test]
    fn test_public_input_binding() {
        let proof = random_proof();
        let public_inputs = [Fr::from(9u64)];
        let perturbed_inputs = [Fr::from(10u64)];

        let base = Transcript::<Bn254, Keccak256Hasher>::new()
            .compute_challenges(&proof, &public_inputs);
        let perturbed = Transcript::<Bn254, Keccak256Hasher>::new()
            .compute_challenges(&proof, &perturbed_inputs);

        // Changing a public signal changes beta, and hence every challenge
        // downstream of it
        assert_ne!(base.beta, perturbed.beta);
        assert_ne!(base.gamma, perturbed.gamma);
        assert_ne!(base.alpha, perturbed.alpha);
        assert_ne!(base.xi, perturbed.xi);
        assert_ne!(base.v[0], perturbed.v[0]);
        assert_ne!(base.u, perturbed.u);
    }

    #[test]
    fn test_opening_challenge_powers() {
        let proof = random_proof();
        let challenges =
            Transcript::<Bn254, Keccak256Hasher>::new().compute_challenges(&proof, &[]);

        for (i, v) in challenges.v.iter().enumerate() {
            assert_eq!(*v, challenges.v[0].pow([i as u64 + 1]));
        }
    }

    #[test]
    fn test_prover_message_binding() {
        let mut proof = random_proof();
        let base = Transcript::<Bn254, Keccak256Hasher>::new().compute_challenges(&proof, &[]);

        // Tampering with the grand product commitment leaves beta and gamma
        // untouched but changes alpha and everything after it
        proof.z = (proof.z + G1Affine::generator()).into();
        let perturbed =
            Transcript::<Bn254, Keccak256Hasher>::new().compute_challenges(&proof, &[]);

        assert_eq!(base.beta, perturbed.beta);
        assert_eq!(base.gamma, perturbed.gamma);
        assert_ne!(base.alpha, perturbed.alpha);
        assert_ne!(base.xi, perturbed.xi);
    }

    #[test]
    fn test_keccak_padding_variant() {
        // Keccak-256 of the empty string, distinguishing the original padding
        // from NIST SHA3-256
        let digest = <Keccak256Hasher as super::TranscriptHasher>::hash(&[]);
        assert_eq!(
            hex::encode(digest),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}
