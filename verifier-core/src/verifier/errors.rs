//! Errors stemming from verifier operations

use verifier_common::{curves::CurveNameError, custom_serde::DecodeError};

/// An error raised when the input is not structurally a proof or key.
///
/// Algebraic failures are not errors: they reject with a `false` return and a
/// debug diagnostic, keeping verification total on well-typed input.
#[derive(Debug)]
pub enum VerifierError {
    /// An object form failed to decode
    Malformed(DecodeError),
    /// The verification key names a curve without a backend
    UnsupportedCurve(CurveNameError),
}

impl From<DecodeError> for VerifierError {
    fn from(value: DecodeError) -> Self {
        VerifierError::Malformed(value)
    }
}

impl From<CurveNameError> for VerifierError {
    fn from(value: CurveNameError) -> Self {
        VerifierError::UnsupportedCurve(value)
    }
}

/// The cause of an algebraic rejection, logged before the verifier returns
/// `false`
#[derive(Debug)]
pub enum Rejection {
    /// A proof commitment failed the on-curve or subgroup test; carries the
    /// name of the offending proof field
    IllFormedPoint(&'static str),
    /// The number of public signals does not match the verification key
    PublicInputCount {
        /// The count declared by the verification key
        expected: usize,
        /// The count supplied by the caller
        actual: usize,
    },
    /// The domain size exceeds the two-adicity of the scalar field
    InvalidDomain,
    /// A denominator of the Lagrange or quotient evaluation was zero; carries
    /// the evaluation being attempted
    DivisionByZero(&'static str),
    /// An MSM was assembled over mismatched slice lengths
    MsmLength,
}
