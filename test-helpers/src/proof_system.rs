//! Plonk proof system test fixtures.
//!
//! Accepting proofs are generated without a prover: the simulated setup
//! samples the KZG trapdoor itself, so polynomial commitments can be
//! published directly in exponent form and the two opening proofs solved from
//! the batched evaluation equations the verifier checks. The pairing identity
//! then holds by construction, and tampering with any committed value breaks
//! it, which is what the soundness tests rely on.

use ark_bls12_381::Bls12_381;
use ark_bn254::Bn254;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, PrimeField, Zero};
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use ark_std::{rand::Rng, UniformRand};
use num_bigint::BigUint;
use serde_json::Value;

use verifier_common::{
    curves::CurveBackend,
    gates::CustomGate,
    types::{
        CustomGateObject, Proof, ProofObject, VerificationKey, VerificationKeyObject,
    },
};
use verifier_core::{
    serde::scalar_to_bytes_be,
    transcript::{Keccak256Hasher, Transcript},
};

/// Exponent-form values of the polynomials committed in a verification key:
/// the commitment to each is its value here times the G1 generator
pub struct CommittedValues<F> {
    /// The multiplication selector value at the trapdoor
    pub q_m: F,
    /// The left-wire selector value at the trapdoor
    pub q_l: F,
    /// The right-wire selector value at the trapdoor
    pub q_r: F,
    /// The output-wire selector value at the trapdoor
    pub q_o: F,
    /// The constant selector value at the trapdoor
    pub q_c: F,
    /// The first permutation polynomial value at the trapdoor
    pub s1: F,
    /// The second permutation polynomial value at the trapdoor
    pub s2: F,
    /// The third permutation polynomial value at the trapdoor
    pub s3: F,
    /// Custom-gate selector values at the trapdoor
    pub qk: Vec<F>,
}

/// A verification key whose SRS trapdoor and committed polynomial values are
/// known, so that accepting proofs can be constructed by solving the opening
/// equations
pub struct SimulatedSetup<P: CurveBackend> {
    /// The verification key
    pub vkey: VerificationKey<P>,
    /// The SRS secret
    pub secret: P::ScalarField,
    /// The committed polynomial values backing the key's commitments
    pub committed: CommittedValues<P::ScalarField>,
}

/// Commits to a polynomial value in exponent form: value·g₁
fn commit_g1<P: CurveBackend>(value: &P::ScalarField) -> P::G1Affine {
    (P::G1Affine::generator().into_group() * *value).into_affine()
}

/// Samples a simulated setup for the given domain size exponent, public input
/// count, and number of custom-gate selectors
pub fn simulated_setup<P: CurveBackend, R: Rng>(
    power: u32,
    n_public: usize,
    num_custom_gates: usize,
    rng: &mut R,
) -> SimulatedSetup<P> {
    let secret = P::ScalarField::rand(rng);
    let committed = CommittedValues {
        q_m: P::ScalarField::rand(rng),
        q_l: P::ScalarField::rand(rng),
        q_r: P::ScalarField::rand(rng),
        q_o: P::ScalarField::rand(rng),
        q_c: P::ScalarField::rand(rng),
        s1: P::ScalarField::rand(rng),
        s2: P::ScalarField::rand(rng),
        s3: P::ScalarField::rand(rng),
        qk: (0..num_custom_gates)
            .map(|_| P::ScalarField::rand(rng))
            .collect(),
    };

    let vkey = VerificationKey {
        power,
        n_public,
        k1: P::ScalarField::from(2u64),
        k2: P::ScalarField::from(3u64),
        q_m: commit_g1::<P>(&committed.q_m),
        q_l: commit_g1::<P>(&committed.q_l),
        q_r: commit_g1::<P>(&committed.q_r),
        q_o: commit_g1::<P>(&committed.q_o),
        q_c: commit_g1::<P>(&committed.q_c),
        s1: commit_g1::<P>(&committed.s1),
        s2: commit_g1::<P>(&committed.s2),
        s3: commit_g1::<P>(&committed.s3),
        x_2: (P::G2Affine::generator().into_group() * secret).into_affine(),
        qk: committed.qk.iter().map(|q| commit_g1::<P>(q)).collect(),
    };

    SimulatedSetup {
        vkey,
        secret,
        committed,
    }
}

/// Generates a proof the verifier accepts for the given public inputs.
///
/// The prover messages through the quotient round are sampled at random; the
/// challenges they induce are replayed through the production transcript, and
/// the two opening proofs are then solved so the batched KZG equation holds.
pub fn simulated_proof<P: CurveBackend, R: Rng>(
    setup: &SimulatedSetup<P>,
    public_inputs: &[P::ScalarField],
    gates: Vec<CustomGate>,
    rng: &mut R,
) -> Proof<P> {
    let trapdoor = setup.secret;
    let committed = &setup.committed;

    // Exponent-form values of the committed prover polynomials
    let a = P::ScalarField::rand(rng);
    let b = P::ScalarField::rand(rng);
    let c = P::ScalarField::rand(rng);
    let z = P::ScalarField::rand(rng);
    let t1 = P::ScalarField::rand(rng);
    let t2 = P::ScalarField::rand(rng);
    let t3 = P::ScalarField::rand(rng);

    // The opening proofs are placeholders until the challenges are known;
    // they only enter the transcript after every challenge they depend on
    let mut proof = Proof {
        a: commit_g1::<P>(&a),
        b: commit_g1::<P>(&b),
        c: commit_g1::<P>(&c),
        z: commit_g1::<P>(&z),
        t1: commit_g1::<P>(&t1),
        t2: commit_g1::<P>(&t2),
        t3: commit_g1::<P>(&t3),
        w_xi: P::G1Affine::generator(),
        w_xi_omega: P::G1Affine::generator(),
        eval_a: P::ScalarField::rand(rng),
        eval_b: P::ScalarField::rand(rng),
        eval_c: P::ScalarField::rand(rng),
        eval_s1: P::ScalarField::rand(rng),
        eval_s2: P::ScalarField::rand(rng),
        eval_zw: P::ScalarField::rand(rng),
        eval_r: P::ScalarField::rand(rng),
        custom_gates: gates,
    };

    let challenges =
        Transcript::<P, Keccak256Hasher>::new().compute_challenges(&proof, public_inputs);
    let (beta, gamma, alpha, xi, v) = (
        challenges.beta,
        challenges.gamma,
        challenges.alpha,
        challenges.xi,
        challenges.v,
    );

    // Replay the verifier-side scalars: ξⁿ, Zh, the Lagrange values, PI, t
    let domain =
        Radix2EvaluationDomain::<P::ScalarField>::new(1usize << setup.vkey.power).unwrap();
    let n = domain.size_as_field_element;

    let mut xin = xi;
    for _ in 0..setup.vkey.power {
        xin.square_in_place();
    }
    let zh = xin - P::ScalarField::one();

    let lagrange: Vec<P::ScalarField> = (0..setup.vkey.n_public.max(1))
        .map(|i| {
            let omega_i = domain.element(i);
            omega_i * zh / (n * (xi - omega_i))
        })
        .collect();
    let pi_eval = public_inputs
        .iter()
        .zip(lagrange.iter())
        .fold(P::ScalarField::zero(), |acc, (input, l)| acc - *input * *l);

    let permutation_term = (proof.eval_a + beta * proof.eval_s1 + gamma)
        * (proof.eval_b + beta * proof.eval_s2 + gamma)
        * (proof.eval_c + gamma)
        * alpha
        * proof.eval_zw;
    let t =
        (proof.eval_r + pi_eval - permutation_term - alpha.square() * lagrange[0]) / zh;

    // The linearisation value, without the u·z term: that term cancels
    // against the shifted opening in the batched equation
    let v1 = v[0];
    let beta_xi = beta * xi;
    let z_scalar = (proof.eval_a + beta_xi + gamma)
        * (proof.eval_b + beta_xi * setup.vkey.k1 + gamma)
        * (proof.eval_c + beta_xi * setup.vkey.k2 + gamma)
        * alpha
        * v1
        + lagrange[0] * alpha.square() * v1;
    let s3_scalar = (proof.eval_a + beta * proof.eval_s1 + gamma)
        * (proof.eval_b + beta * proof.eval_s2 + gamma)
        * alpha
        * v1
        * beta
        * proof.eval_zw;

    let mut d = committed.q_m * (proof.eval_a * proof.eval_b * v1)
        + committed.q_l * proof.eval_a * v1
        + committed.q_r * proof.eval_b * v1
        + committed.q_o * proof.eval_c * v1
        + committed.q_c * v1
        + z * z_scalar
        - committed.s3 * s3_scalar;
    for (gate, qk) in proof.custom_gates.iter().zip(committed.qk.iter()) {
        d += *qk
            * gate.plonk_factor(
                proof.eval_a * v1,
                proof.eval_b * v1,
                proof.eval_c * v1,
            );
    }

    let f = t1 + xin * t2 + xin.square() * t3
        + d
        + v[1] * a
        + v[2] * b
        + v[3] * c
        + v[4] * committed.s1
        + v[5] * committed.s2;
    let e = t
        + v1 * proof.eval_r
        + v[1] * proof.eval_a
        + v[2] * proof.eval_b
        + v[3] * proof.eval_c
        + v[4] * proof.eval_s1
        + v[5] * proof.eval_s2;

    // Solve the two opening equations at the trapdoor
    let w_xi = (f - e) / (trapdoor - xi);
    let w_xi_omega = (z - proof.eval_zw) / (trapdoor - xi * domain.group_gen);

    proof.w_xi = commit_g1::<P>(&w_xi);
    proof.w_xi_omega = commit_g1::<P>(&w_xi_omega);
    proof
}

// ------------------------
// | OBJECT FORM BUILDERS |
// ------------------------

/// Serializes a scalar to its decimal object form
pub fn scalar_to_decimal<F: PrimeField>(scalar: &F) -> String {
    BigUint::from_bytes_be(&scalar_to_bytes_be(scalar)).to_string()
}

/// Serializes a G1 point to its object form as a Jacobian triple of decimal
/// strings
pub fn g1_to_object<P: CurveBackend>(point: &P::G1Affine) -> Vec<String> {
    let bytes = P::g1_to_uncompressed_be(point);
    let (x, y) = bytes.split_at(bytes.len() / 2);

    vec![
        BigUint::from_bytes_be(x).to_string(),
        BigUint::from_bytes_be(y).to_string(),
        "1".to_string(),
    ]
}

/// Test-side serialization of G2 points back to the coordinate-pair object
/// form; production code only ever decodes this direction
pub trait G2ToObject: CurveBackend {
    /// Serializes a G2 point as [[x.c0, x.c1], [y.c0, y.c1], [1, 0]]
    fn g2_to_object(point: &Self::G2Affine) -> Vec<Vec<String>>;
}

impl G2ToObject for Bn254 {
    fn g2_to_object(point: &Self::G2Affine) -> Vec<Vec<String>> {
        let decimal = |c: &ark_bn254::Fq| BigUint::from(c.into_bigint()).to_string();
        vec![
            vec![decimal(&point.x.c0), decimal(&point.x.c1)],
            vec![decimal(&point.y.c0), decimal(&point.y.c1)],
            vec!["1".to_string(), "0".to_string()],
        ]
    }
}

impl G2ToObject for Bls12_381 {
    fn g2_to_object(point: &Self::G2Affine) -> Vec<Vec<String>> {
        let decimal = |c: &ark_bls12_381::Fq| BigUint::from(c.into_bigint()).to_string();
        vec![
            vec![decimal(&point.x.c0), decimal(&point.x.c1)],
            vec![decimal(&point.y.c0), decimal(&point.y.c1)],
            vec!["1".to_string(), "0".to_string()],
        ]
    }
}

/// Serializes a verification key to its external object form
pub fn vkey_to_object<P: G2ToObject>(vkey: &VerificationKey<P>) -> VerificationKeyObject {
    VerificationKeyObject {
        protocol: Some("plonk".to_string()),
        curve: P::NAME.to_string(),
        power: vkey.power,
        n_public: vkey.n_public,
        k1: scalar_to_decimal(&vkey.k1),
        k2: scalar_to_decimal(&vkey.k2),
        q_m: g1_to_object::<P>(&vkey.q_m),
        q_l: g1_to_object::<P>(&vkey.q_l),
        q_r: g1_to_object::<P>(&vkey.q_r),
        q_o: g1_to_object::<P>(&vkey.q_o),
        q_c: g1_to_object::<P>(&vkey.q_c),
        s1: g1_to_object::<P>(&vkey.s1),
        s2: g1_to_object::<P>(&vkey.s2),
        s3: g1_to_object::<P>(&vkey.s3),
        x_2: P::g2_to_object(&vkey.x_2),
        qk: vkey.qk.iter().map(|p| g1_to_object::<P>(p)).collect(),
    }
}

/// Serializes a proof to its external object form
pub fn proof_to_object<P: CurveBackend>(proof: &Proof<P>) -> ProofObject {
    ProofObject {
        protocol: Some("plonk".to_string()),
        curve: Some(P::NAME.to_string()),
        a: g1_to_object::<P>(&proof.a),
        b: g1_to_object::<P>(&proof.b),
        c: g1_to_object::<P>(&proof.c),
        z: g1_to_object::<P>(&proof.z),
        t1: g1_to_object::<P>(&proof.t1),
        t2: g1_to_object::<P>(&proof.t2),
        t3: g1_to_object::<P>(&proof.t3),
        w_xi: g1_to_object::<P>(&proof.w_xi),
        w_xi_omega: g1_to_object::<P>(&proof.w_xi_omega),
        eval_a: scalar_to_decimal(&proof.eval_a),
        eval_b: scalar_to_decimal(&proof.eval_b),
        eval_c: scalar_to_decimal(&proof.eval_c),
        eval_s1: scalar_to_decimal(&proof.eval_s1),
        eval_s2: scalar_to_decimal(&proof.eval_s2),
        eval_zw: scalar_to_decimal(&proof.eval_zw),
        eval_r: scalar_to_decimal(&proof.eval_r),
        custom_gates: proof
            .custom_gates
            .iter()
            .map(|gate| CustomGateObject {
                id: gate.id().to_string(),
                proof: Value::Null,
            })
            .collect(),
    }
}

/// Serializes canonical public signals to their decimal object form
pub fn signals_to_object<F: PrimeField>(signals: &[F]) -> Vec<String> {
    signals.iter().map(scalar_to_decimal).collect()
}
