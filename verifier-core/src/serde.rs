//! Serialization of field elements into the byte form consumed by the
//! transcript.

use ark_ff::{BigInteger, PrimeField};

/// Serializes a scalar into its fixed-width big-endian transcript form
pub fn scalar_to_bytes_be<F: PrimeField>(scalar: &F) -> Vec<u8> {
    scalar.into_bigint().to_bytes_be()
}

/// Serializes a sequence of scalars into a contiguous big-endian byte array
pub fn scalars_to_bytes_be<F: PrimeField>(scalars: &[F]) -> Vec<u8> {
    scalars.iter().flat_map(scalar_to_bytes_be).collect()
}

#[cfg(test)]
mod tests {
    use ark_bn254::Fr;
    use ark_ff::One;

    use super::{scalar_to_bytes_be, scalars_to_bytes_be};

    #[test]
    fn test_scalar_width_is_fixed() {
        let one = scalar_to_bytes_be(&Fr::one());
        assert_eq!(one.len(), 32);
        assert_eq!(one[31], 1);
        assert!(one[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_scalars_are_densely_packed() {
        let scalars = [Fr::one(); 3];
        assert_eq!(scalars_to_bytes_be(&scalars).len(), 96);
    }
}
