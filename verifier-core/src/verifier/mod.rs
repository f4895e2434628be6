//! The Plonk verification algorithm, as described in the paper:
//! https://eprint.iacr.org/2019/953.pdf.
//!
//! Verification is a straight-line pipeline: structural validation, challenge
//! derivation, evaluation of the vanishing and Lagrange polynomials at the
//! challenge point, reconstruction of the quotient value t and of the batched
//! commitments D, F and E, and a single pairing equation over the KZG opening
//! proofs. Custom gates contribute a term to D and a pairing-free side
//! condition each; overall acceptance is the conjunction of the pairing
//! result and every side condition.

pub mod errors;

use ark_bls12_381::Bls12_381;
use ark_bn254::Bn254;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, PrimeField};
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use tracing::debug;

use verifier_common::{
    curves::{CurveBackend, CurveId},
    custom_serde::{decode_proof, decode_public_signals, decode_verification_key},
    types::{Challenges, Proof, ProofObject, VerificationKey, VerificationKeyObject},
};

use crate::{
    serde::scalar_to_bytes_be,
    transcript::{Keccak256Hasher, Transcript, TranscriptHasher},
};

use self::errors::{Rejection, VerifierError};

/// Verifies a proof in its external object form.
///
/// Dispatches to the curve backend named by the verification key, decodes all
/// three inputs, and runs the verification pipeline. Malformed input is the
/// only error path; every algebraic failure returns `Ok(false)` with a debug
/// diagnostic.
pub fn verify_proof(
    vkey: &VerificationKeyObject,
    public_signals: &[String],
    proof: &ProofObject,
) -> Result<bool, VerifierError> {
    match CurveId::from_name(&vkey.curve)? {
        CurveId::Bn254 => verify_object::<Bn254>(vkey, public_signals, proof),
        CurveId::Bls12_381 => verify_object::<Bls12_381>(vkey, public_signals, proof),
    }
}

/// Decodes the object forms for a concrete curve backend and verifies
fn verify_object<P: CurveBackend>(
    vkey: &VerificationKeyObject,
    public_signals: &[String],
    proof: &ProofObject,
) -> Result<bool, VerifierError> {
    let vkey = decode_verification_key::<P>(vkey)?;
    let public_inputs = decode_public_signals::<P::ScalarField>(public_signals)?;
    let proof = decode_proof::<P>(proof, &vkey)?;

    Ok(verify::<P, Keccak256Hasher>(&vkey, &proof, &public_inputs))
}

/// Verifies a decoded proof against a decoded verification key and
/// canonicalised public inputs.
///
/// Pure: the result is a function of the arguments alone, and two invocations
/// derive identical challenges.
pub fn verify<P: CurveBackend, H: TranscriptHasher>(
    vkey: &VerificationKey<P>,
    proof: &Proof<P>,
    public_inputs: &[P::ScalarField],
) -> bool {
    match verify_inner::<P, H>(vkey, proof, public_inputs) {
        Ok(accepted) => accepted,
        Err(rejection) => {
            debug!(?rejection, "proof rejected");
            false
        }
    }
}

/// The verification pipeline; any stage failure short-circuits to rejection
fn verify_inner<P: CurveBackend, H: TranscriptHasher>(
    vkey: &VerificationKey<P>,
    proof: &Proof<P>,
    public_inputs: &[P::ScalarField],
) -> Result<bool, Rejection> {
    validate_proof_points(proof)?;
    validate_public_input_count(vkey, public_inputs)?;

    let challenges = Transcript::<P, H>::new().compute_challenges(proof, public_inputs);
    debug!(
        beta = %hex_scalar(&challenges.beta),
        gamma = %hex_scalar(&challenges.gamma),
        alpha = %hex_scalar(&challenges.alpha),
        xi = %hex_scalar(&challenges.xi),
        v1 = %hex_scalar(&challenges.v[0]),
        v2 = %hex_scalar(&challenges.v[1]),
        v3 = %hex_scalar(&challenges.v[2]),
        v4 = %hex_scalar(&challenges.v[3]),
        v5 = %hex_scalar(&challenges.v[4]),
        v6 = %hex_scalar(&challenges.v[5]),
        u = %hex_scalar(&challenges.u),
        "derived challenges"
    );

    // A hostile key can carry any exponent; reject anything the shift or the
    // field's two-adicity cannot accommodate instead of panicking
    let size = 1usize
        .checked_shl(vkey.power)
        .ok_or(Rejection::InvalidDomain)?;
    let domain =
        Radix2EvaluationDomain::<P::ScalarField>::new(size).ok_or(Rejection::InvalidDomain)?;

    let (xin, zh) = evaluate_vanishing_polynomial(vkey.power, &challenges.xi);
    let lagrange_evals =
        evaluate_lagrange_basis(&domain, vkey.n_public.max(1), &challenges.xi, &zh)?;
    let pi_eval = evaluate_public_input_poly(&lagrange_evals, public_inputs);

    let t = evaluate_quotient(proof, &challenges, &pi_eval, &lagrange_evals[0], &zh)?;
    let d = linearisation_commitment(vkey, proof, &challenges, &lagrange_evals[0])?;
    let f = batched_commitment(vkey, proof, &challenges, &xin, &d)?;
    let e = batched_evaluation(proof, &challenges, &t)?;
    debug!(
        d = %hex_point::<P>(&d),
        f = %hex_point::<P>(&f),
        e = %hex_point::<P>(&e),
        "reconstructed batched commitments"
    );

    let pairing_ok = opening_pairing_check(vkey, proof, &challenges, &domain, &f, &e)?;
    if !pairing_ok {
        debug!("pairing equation does not hold");
    }

    let gates_ok = proof.custom_gates.iter().all(|gate| gate.verify_proof());
    if !gates_ok {
        debug!("a custom gate rejected its sub-proof");
    }

    Ok(pairing_ok && gates_ok)
}

/// Every proof commitment must satisfy the curve equation and lie in the
/// prime-order subgroup; the scalar fields are implicitly canonical from
/// decoding
fn validate_proof_points<P: CurveBackend>(proof: &Proof<P>) -> Result<(), Rejection> {
    let points = [
        ("A", &proof.a),
        ("B", &proof.b),
        ("C", &proof.c),
        ("Z", &proof.z),
        ("T1", &proof.t1),
        ("T2", &proof.t2),
        ("T3", &proof.t3),
        ("Wxi", &proof.w_xi),
        ("Wxiw", &proof.w_xi_omega),
    ];

    for (name, point) in points {
        if !P::g1_is_valid(point) {
            return Err(Rejection::IllFormedPoint(name));
        }
    }

    Ok(())
}

/// The proof must carry exactly as many public signals as the key declares
fn validate_public_input_count<P: CurveBackend>(
    vkey: &VerificationKey<P>,
    public_inputs: &[P::ScalarField],
) -> Result<(), Rejection> {
    if public_inputs.len() != vkey.n_public {
        return Err(Rejection::PublicInputCount {
            expected: vkey.n_public,
            actual: public_inputs.len(),
        });
    }

    Ok(())
}

/// Computes ξⁿ by repeated squaring and the vanishing value Zh(ξ) = ξⁿ − 1
fn evaluate_vanishing_polynomial<F: PrimeField>(power: u32, xi: &F) -> (F, F) {
    let mut xin = *xi;
    for _ in 0..power {
        xin.square_in_place();
    }

    (xin, xin - F::one())
}

/// Evaluates the first `count` Lagrange basis polynomials at ξ:
///
///   L_i(ξ) = ω^(i−1) · Zh(ξ) / (n · (ξ − ω^(i−1)))
///
/// A zero denominator means ξ landed on a domain element, which honest
/// transcripts reach with negligible probability
fn evaluate_lagrange_basis<F: PrimeField>(
    domain: &Radix2EvaluationDomain<F>,
    count: usize,
    xi: &F,
    zh: &F,
) -> Result<Vec<F>, Rejection> {
    let n = domain.size_as_field_element;

    let mut evals = Vec::with_capacity(count);
    for i in 0..count {
        let omega_i = domain.element(i);
        let denominator = (n * (*xi - omega_i))
            .inverse()
            .ok_or(Rejection::DivisionByZero("lagrange basis"))?;
        evals.push(omega_i * *zh * denominator);
    }

    Ok(evals)
}

/// Evaluates the public input polynomial at ξ: PI(ξ) = Σ (−wᵢ)·Lᵢ(ξ)
fn evaluate_public_input_poly<F: PrimeField>(lagrange_evals: &[F], public_inputs: &[F]) -> F {
    public_inputs
        .iter()
        .zip(lagrange_evals.iter())
        .fold(F::zero(), |acc, (input, lagrange)| {
            acc - *input * *lagrange
        })
}

/// Reconstructs the quotient polynomial value t(ξ) from the claimed
/// evaluations, the public input value, and the challenges
fn evaluate_quotient<P: CurveBackend>(
    proof: &Proof<P>,
    challenges: &Challenges<P::ScalarField>,
    pi_eval: &P::ScalarField,
    lagrange_1: &P::ScalarField,
    zh: &P::ScalarField,
) -> Result<P::ScalarField, Rejection> {
    let Challenges {
        alpha, beta, gamma, ..
    } = challenges;

    let permutation_term = (proof.eval_a + *beta * proof.eval_s1 + *gamma)
        * (proof.eval_b + *beta * proof.eval_s2 + *gamma)
        * (proof.eval_c + *gamma)
        * *alpha
        * proof.eval_zw;

    let numerator =
        proof.eval_r + *pi_eval - permutation_term - alpha.square() * *lagrange_1;
    let zh_inv = zh
        .inverse()
        .ok_or(Rejection::DivisionByZero("vanishing polynomial"))?;

    Ok(numerator * zh_inv)
}

/// Builds the linearisation commitment D as a single MSM over the selector,
/// permutation, and grand product commitments, splicing in one term per
/// custom gate
fn linearisation_commitment<P: CurveBackend>(
    vkey: &VerificationKey<P>,
    proof: &Proof<P>,
    challenges: &Challenges<P::ScalarField>,
    lagrange_1: &P::ScalarField,
) -> Result<P::G1Affine, Rejection> {
    let Challenges {
        alpha,
        beta,
        gamma,
        xi,
        v,
        u,
    } = challenges;
    let v1 = v[0];

    let beta_xi = *beta * *xi;
    let z_scalar = (proof.eval_a + beta_xi + *gamma)
        * (proof.eval_b + beta_xi * vkey.k1 + *gamma)
        * (proof.eval_c + beta_xi * vkey.k2 + *gamma)
        * *alpha
        * v1
        + *lagrange_1 * alpha.square() * v1
        + *u;
    let s3_scalar = (proof.eval_a + *beta * proof.eval_s1 + *gamma)
        * (proof.eval_b + *beta * proof.eval_s2 + *gamma)
        * *alpha
        * v1
        * *beta
        * proof.eval_zw;

    let mut points = vec![vkey.q_m];
    let mut scalars = vec![proof.eval_a * proof.eval_b * v1];

    for (gate, qk) in proof.custom_gates.iter().zip(vkey.qk.iter()) {
        points.push(*qk);
        scalars.push(gate.plonk_factor(
            proof.eval_a * v1,
            proof.eval_b * v1,
            proof.eval_c * v1,
        ));
    }

    points.extend([vkey.q_l, vkey.q_r, vkey.q_o, vkey.q_c, proof.z, vkey.s3]);
    scalars.extend([
        proof.eval_a * v1,
        proof.eval_b * v1,
        proof.eval_c * v1,
        v1,
        z_scalar,
        -s3_scalar,
    ]);

    let d = P::msm(&points, &scalars).ok_or(Rejection::MsmLength)?;
    Ok(d.into_affine())
}

/// Builds the batched commitment F over the split quotient, linearisation,
/// wire, and permutation commitments
fn batched_commitment<P: CurveBackend>(
    vkey: &VerificationKey<P>,
    proof: &Proof<P>,
    challenges: &Challenges<P::ScalarField>,
    xin: &P::ScalarField,
    d: &P::G1Affine,
) -> Result<P::G1Affine, Rejection> {
    let Challenges { v, .. } = challenges;

    let points = [
        proof.t1, proof.t2, proof.t3, *d, proof.a, proof.b, proof.c, vkey.s1, vkey.s2,
    ];
    let scalars = [
        P::ScalarField::one(),
        *xin,
        xin.square(),
        P::ScalarField::one(),
        v[1],
        v[2],
        v[3],
        v[4],
        v[5],
    ];

    let f = P::msm(&points, &scalars).ok_or(Rejection::MsmLength)?;
    Ok(f.into_affine())
}

/// Builds the group-encoded batch evaluation E = s·g₁
fn batched_evaluation<P: CurveBackend>(
    proof: &Proof<P>,
    challenges: &Challenges<P::ScalarField>,
    t: &P::ScalarField,
) -> Result<P::G1Affine, Rejection> {
    let Challenges { v, u, .. } = challenges;

    let s = *t
        + v[0] * proof.eval_r
        + v[1] * proof.eval_a
        + v[2] * proof.eval_b
        + v[3] * proof.eval_c
        + v[4] * proof.eval_s1
        + v[5] * proof.eval_s2
        + *u * proof.eval_zw;

    let e = P::msm(&[P::G1Affine::generator()], &[s]).ok_or(Rejection::MsmLength)?;
    Ok(e.into_affine())
}

/// Checks the batched KZG opening equation e(−A₁, X₂)·e(B₁, g₂) = 1 with
///
///   A₁ = Wxi + Wxiw·u
///   B₁ = Wxi·ξ + Wxiw·(u·ξ·ω) + F − E
fn opening_pairing_check<P: CurveBackend>(
    vkey: &VerificationKey<P>,
    proof: &Proof<P>,
    challenges: &Challenges<P::ScalarField>,
    domain: &Radix2EvaluationDomain<P::ScalarField>,
    f: &P::G1Affine,
    e: &P::G1Affine,
) -> Result<bool, Rejection> {
    let Challenges { xi, u, .. } = challenges;
    let Radix2EvaluationDomain {
        group_gen: omega, ..
    } = domain;

    let a1 = P::msm(
        &[proof.w_xi, proof.w_xi_omega],
        &[P::ScalarField::one(), *u],
    )
    .ok_or(Rejection::MsmLength)?;

    let b1 = P::msm(
        &[proof.w_xi, proof.w_xi_omega, *f, *e],
        &[
            *xi,
            *u * *xi * *omega,
            P::ScalarField::one(),
            -P::ScalarField::one(),
        ],
    )
    .ok_or(Rejection::MsmLength)?
    .into_affine();

    let a1_affine = a1.into_affine();
    debug!(
        a1 = %hex_point::<P>(&a1_affine),
        b1 = %hex_point::<P>(&b1),
        "assembled opening commitments"
    );

    Ok(P::pairing_eq(
        (-a1).into_affine(),
        vkey.x_2,
        b1,
        P::G2Affine::generator(),
    ))
}

/// Hex form of a scalar for debug diagnostics
fn hex_scalar<F: PrimeField>(scalar: &F) -> String {
    hex::encode(scalar_to_bytes_be(scalar))
}

/// Hex form of a curve point for debug diagnostics
fn hex_point<P: CurveBackend>(point: &P::G1Affine) -> String {
    hex::encode(P::g1_to_uncompressed_be(point))
}

#[cfg(test)]
mod tests {
    use ark_bn254::Fr;
    use ark_ff::{One, UniformRand, Zero};
    use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
    use ark_std::test_rng;

    use super::{
        evaluate_lagrange_basis, evaluate_public_input_poly, evaluate_vanishing_polynomial,
    };

    const POWER: u32 = 3;

    #[test]
    fn test_vanishing_polynomial_on_domain() {
        let domain = Radix2EvaluationDomain::<Fr>::new(1 << POWER).unwrap();

        // Zh vanishes on every domain element and nowhere else we sample
        for i in 0..domain.size() {
            let (_, zh) = evaluate_vanishing_polynomial(POWER, &domain.element(i));
            assert!(zh.is_zero());
        }

        let mut rng = test_rng();
        let (xin, zh) = evaluate_vanishing_polynomial(POWER, &Fr::rand(&mut rng));
        assert_eq!(zh, xin - Fr::one());
        assert!(!zh.is_zero());
    }

    #[test]
    fn test_lagrange_basis_sums_to_one() {
        let mut rng = test_rng();
        let domain = Radix2EvaluationDomain::<Fr>::new(1 << POWER).unwrap();

        let xi = Fr::rand(&mut rng);
        let (_, zh) = evaluate_vanishing_polynomial(POWER, &xi);
        let evals = evaluate_lagrange_basis(&domain, domain.size(), &xi, &zh).unwrap();

        let sum: Fr = evals.iter().sum();
        assert_eq!(sum, Fr::one());
    }

    #[test]
    fn test_lagrange_basis_rejects_domain_point() {
        let domain = Radix2EvaluationDomain::<Fr>::new(1 << POWER).unwrap();

        // At ξ = ω the first basis polynomial is 0/0; the evaluator treats
        // the hit as a fatal arithmetic condition rather than resolving it
        let xi = domain.element(1);
        let (_, zh) = evaluate_vanishing_polynomial(POWER, &xi);
        assert!(evaluate_lagrange_basis(&domain, 2, &xi, &zh).is_err());
    }

    #[test]
    fn test_public_input_poly_negates_signals() {
        let mut rng = test_rng();
        let lagrange = [Fr::rand(&mut rng), Fr::rand(&mut rng)];
        let inputs = [Fr::rand(&mut rng), Fr::rand(&mut rng)];

        let pi = evaluate_public_input_poly(&lagrange, &inputs);
        assert_eq!(pi, -(inputs[0] * lagrange[0] + inputs[1] * lagrange[1]));
    }

    #[test]
    fn test_public_input_poly_empty_is_zero() {
        assert!(evaluate_public_input_poly::<Fr>(&[Fr::one()], &[]).is_zero());
    }
}
