//! Curve backends for the verifier.
//!
//! The verifier consumes the pairing curve through the narrow [`CurveBackend`]
//! interface: point construction from the external coordinate arrays, curve
//! and subgroup membership, the uncompressed transcript serialization, MSM,
//! and the product-of-pairings identity check. Backends exist for BN254 and
//! BLS12-381, selected by the curve name stored in verification artifacts.

use ark_bls12_381::Bls12_381;
use ark_bn254::Bn254;
use ark_ec::{
    pairing::{Pairing, PairingOutput},
    short_weierstrass::{Affine, SWCurveConfig},
    AffineRepr, VariableBaseMSM,
};
use ark_ff::{BigInteger, Field, Fp2, Fp2Config, PrimeField, Zero};
use num_bigint::BigUint;

/// Identifies a supported pairing curve by the name stored in verification
/// artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveId {
    /// The BN254 curve, named "bn128" by the upstream toolchain
    Bn254,
    /// The BLS12-381 curve
    Bls12_381,
}

/// An error raised when a verification key names an unknown curve
#[derive(Debug)]
pub struct CurveNameError(pub String);

impl CurveId {
    /// Resolves a curve name to a backend identifier.
    ///
    /// Matching ignores case and separators and accepts the aliases used by
    /// upstream artifacts ("bn128", "bn254", "altbn128", "bls12381",
    /// "bls12-381").
    pub fn from_name(name: &str) -> Result<Self, CurveNameError> {
        let normalized: String = name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "bn128" | "bn254" | "altbn128" => Ok(CurveId::Bn254),
            "bls12381" => Ok(CurveId::Bls12_381),
            _ => Err(CurveNameError(name.into())),
        }
    }
}

/// The interface to the pairing curve library consumed by the verifier.
///
/// Implementations delegate to Arkworks; the verifier itself never touches
/// curve internals beyond this trait.
pub trait CurveBackend: Pairing {
    /// The canonical curve name
    const NAME: &'static str;

    /// Builds a G1 point from a decoded coordinate array.
    ///
    /// Accepts an affine pair or a Jacobian triple; a triple with z = 0 is
    /// the identity. Returns `None` on any other arity. The point is not
    /// checked for curve membership here; see [`Self::g1_is_valid`].
    fn g1_from_object(coords: &[BigUint]) -> Option<Self::G1Affine>;

    /// Builds a G2 point from a decoded array of extension-field coordinate
    /// pairs, with the same affine/Jacobian convention as G1.
    fn g2_from_object(coords: &[Vec<BigUint>]) -> Option<Self::G2Affine>;

    /// Checks that a point satisfies the curve equation and lies in the
    /// prime-order subgroup
    fn g1_is_valid(point: &Self::G1Affine) -> bool;

    /// Serializes a point uncompressed into the transcript form: both affine
    /// coordinates big-endian at the base-field width, the identity as zeros
    fn g1_to_uncompressed_be(point: &Self::G1Affine) -> Vec<u8>;

    /// Multi-scalar multiplication over G1, delegated to the curve library.
    /// `None` if the slices have mismatched lengths.
    fn msm(points: &[Self::G1Affine], scalars: &[Self::ScalarField]) -> Option<Self::G1>;

    /// Checks the pairing identity e(p1, q1) * e(p2, q2) == 1
    fn pairing_eq(
        p1: Self::G1Affine,
        q1: Self::G2Affine,
        p2: Self::G1Affine,
        q2: Self::G2Affine,
    ) -> bool {
        Self::multi_pairing([p1, p2], [q1, q2]) == PairingOutput::<Self>::zero()
    }
}

impl CurveBackend for Bn254 {
    const NAME: &'static str = "bn128";

    fn g1_from_object(coords: &[BigUint]) -> Option<Self::G1Affine> {
        sw_point_from_object(coords.iter().map(fp_from_biguint).collect::<Vec<_>>())
    }

    fn g2_from_object(coords: &[Vec<BigUint>]) -> Option<Self::G2Affine> {
        sw_point_from_object(
            coords
                .iter()
                .map(|pair| fp2_from_biguints::<ark_bn254::Fq2Config>(pair))
                .collect::<Option<Vec<_>>>()?,
        )
    }

    fn g1_is_valid(point: &Self::G1Affine) -> bool {
        point.is_on_curve() && point.is_in_correct_subgroup_assuming_on_curve()
    }

    fn g1_to_uncompressed_be(point: &Self::G1Affine) -> Vec<u8> {
        sw_uncompressed_be(point)
    }

    fn msm(points: &[Self::G1Affine], scalars: &[Self::ScalarField]) -> Option<Self::G1> {
        ark_bn254::G1Projective::msm(points, scalars).ok()
    }
}

impl CurveBackend for Bls12_381 {
    const NAME: &'static str = "bls12381";

    fn g1_from_object(coords: &[BigUint]) -> Option<Self::G1Affine> {
        sw_point_from_object(coords.iter().map(fp_from_biguint).collect::<Vec<_>>())
    }

    fn g2_from_object(coords: &[Vec<BigUint>]) -> Option<Self::G2Affine> {
        sw_point_from_object(
            coords
                .iter()
                .map(|pair| fp2_from_biguints::<ark_bls12_381::Fq2Config>(pair))
                .collect::<Option<Vec<_>>>()?,
        )
    }

    fn g1_is_valid(point: &Self::G1Affine) -> bool {
        point.is_on_curve() && point.is_in_correct_subgroup_assuming_on_curve()
    }

    fn g1_to_uncompressed_be(point: &Self::G1Affine) -> Vec<u8> {
        sw_uncompressed_be(point)
    }

    fn msm(points: &[Self::G1Affine], scalars: &[Self::ScalarField]) -> Option<Self::G1> {
        ark_bls12_381::G1Projective::msm(points, scalars).ok()
    }
}

/// Canonicalises a big integer into a prime field element by big-endian
/// reduction
fn fp_from_biguint<F: PrimeField>(value: &BigUint) -> F {
    F::from_be_bytes_mod_order(&value.to_bytes_be())
}

/// Builds a quadratic extension element from a `[c0, c1]` coordinate pair
fn fp2_from_biguints<Q: Fp2Config>(pair: &[BigUint]) -> Option<Fp2<Q>> {
    match pair {
        [c0, c1] => Some(Fp2::<Q>::new(fp_from_biguint(c0), fp_from_biguint(c1))),
        _ => None,
    }
}

/// Normalises an affine pair or Jacobian triple of field coordinates into an
/// affine short-Weierstrass point
fn sw_point_from_object<C: SWCurveConfig>(coords: Vec<C::BaseField>) -> Option<Affine<C>> {
    match coords.as_slice() {
        [x, y] => Some(Affine::<C>::new_unchecked(*x, *y)),
        [_, _, z] if z.is_zero() => Some(Affine::<C>::identity()),
        [x, y, z] => {
            let z_inv = z.inverse()?;
            let z_inv_squared = z_inv.square();
            Some(Affine::<C>::new_unchecked(
                *x * z_inv_squared,
                *y * z_inv_squared * z_inv,
            ))
        }
        _ => None,
    }
}

/// Serializes an affine point as x || y, each big-endian at the base-field
/// width; the identity serializes as zero coordinates
fn sw_uncompressed_be<C: SWCurveConfig>(point: &Affine<C>) -> Vec<u8>
where
    C::BaseField: PrimeField,
{
    let zero = C::BaseField::zero();
    let (x, y) = point.xy().unwrap_or((&zero, &zero));

    let mut bytes = x.into_bigint().to_bytes_be();
    bytes.extend(y.into_bigint().to_bytes_be());
    bytes
}

#[cfg(test)]
mod tests {
    use ark_bls12_381::Bls12_381;
    use ark_bn254::Bn254;
    use ark_ec::AffineRepr;
    use num_bigint::BigUint;

    use super::{CurveBackend, CurveId};

    #[test]
    fn test_curve_name_aliases() {
        for name in ["bn128", "bn254", "BN254", "altbn128", "alt_bn128"] {
            assert_eq!(CurveId::from_name(name).unwrap(), CurveId::Bn254);
        }
        for name in ["bls12381", "bls12-381", "bls12_381", "BLS12-381"] {
            assert_eq!(CurveId::from_name(name).unwrap(), CurveId::Bls12_381);
        }
        assert!(CurveId::from_name("bw6-761").is_err());
    }

    #[test]
    fn test_g1_from_object_bn254_generator() {
        // The BN254 G1 generator is (1, 2)
        let coords = [1u64, 2, 1].map(BigUint::from);
        let point = <Bn254 as CurveBackend>::g1_from_object(&coords).unwrap();
        assert_eq!(point, ark_bn254::G1Affine::generator());
        assert!(<Bn254 as CurveBackend>::g1_is_valid(&point));
    }

    #[test]
    fn test_g1_from_object_zero_z_is_identity() {
        let coords = [0u64, 1, 0].map(BigUint::from);
        let point = <Bn254 as CurveBackend>::g1_from_object(&coords).unwrap();
        assert!(point.is_zero());
    }

    #[test]
    fn test_g1_off_curve_is_invalid() {
        let coords = [0u64, 0].map(BigUint::from);
        let point = <Bn254 as CurveBackend>::g1_from_object(&coords).unwrap();
        assert!(!<Bn254 as CurveBackend>::g1_is_valid(&point));
    }

    #[test]
    fn test_g1_uncompressed_widths() {
        let bn_point = ark_bn254::G1Affine::generator();
        assert_eq!(
            <Bn254 as CurveBackend>::g1_to_uncompressed_be(&bn_point).len(),
            64
        );

        let bls_point = ark_bls12_381::G1Affine::generator();
        assert_eq!(
            <Bls12_381 as CurveBackend>::g1_to_uncompressed_be(&bls_point).len(),
            96
        );
    }

    #[test]
    fn test_g1_bad_arity_rejected() {
        let coords = [1u64].map(BigUint::from);
        assert!(<Bn254 as CurveBackend>::g1_from_object(&coords).is_none());
    }
}
