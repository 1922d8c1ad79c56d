use std::collections::HashSet;

use num_bigint::BigInt;
use num_traits::{One, Zero};
use thiserror::Error;

use super::Point;

#[derive(Debug, Error, PartialEq)]
pub enum InterpolationError {
    #[error("threshold must be at least 1")]
    InvalidThreshold,
    #[error("insufficient points: need {required}, got {provided}")]
    InsufficientPoints { required: usize, provided: usize },
    #[error("x-coordinate {0} appears more than once")]
    DuplicateCoordinate(i64),
    #[error("constant term {numerator}/{denominator} is not an integer")]
    InexactDivision {
        numerator: BigInt,
        denominator: BigInt,
    },
}

/// Computes the constant term of the unique polynomial of degree `k - 1` going through the first `k` points,
/// i.e. its value at x = 0, using Lagrange interpolation over arbitrary-precision integers.
///
/// Every term `y_i * Π(-x_j) / Π(x_i - x_j)` is kept as an exact fraction, the only division happens once
/// all the terms have been summed. Points after the first `k` are ignored.
/// # Arguments
/// * `points` - The points, at least `k` of them.
/// * `k` - The number of points to use, i.e. the degree of the polynomial plus one.
/// # Errors
/// * `InterpolationError::InvalidThreshold` - If `k` is zero.
/// * `InterpolationError::InsufficientPoints` - If there are less than `k` points.
/// * `InterpolationError::DuplicateCoordinate` - If two of the first `k` points share their x-coordinate.
/// * `InterpolationError::InexactDivision` - If the constant term is not an integer.
pub fn constant_term(points: &[Point], k: usize) -> Result<BigInt, InterpolationError> {
    if k == 0 {
        return Err(InterpolationError::InvalidThreshold);
    }
    if points.len() < k {
        return Err(InterpolationError::InsufficientPoints {
            required: k,
            provided: points.len(),
        });
    }
    let points = &points[..k];

    let mut coordinates = HashSet::with_capacity(k);
    for point in points {
        if !coordinates.insert(point.x) {
            return Err(InterpolationError::DuplicateCoordinate(point.x));
        }
    }

    // Running sum of the terms, as `numerator / denominator`
    let mut numerator = BigInt::zero();
    let mut denominator = BigInt::one();
    for (i, point) in points.iter().enumerate() {
        let (basis_numerator, basis_denominator) = basis_at_zero(points, i);
        numerator = numerator * &basis_denominator + &point.y * basis_numerator * &denominator;
        denominator *= basis_denominator;
    }

    if !(&numerator % &denominator).is_zero() {
        return Err(InterpolationError::InexactDivision {
            numerator,
            denominator,
        });
    }
    Ok(numerator / denominator)
}

/// Numerator and denominator of the `i`-th Lagrange basis polynomial evaluated at zero.
/// The denominator is non zero as long as the x-coordinates are distinct.
fn basis_at_zero(points: &[Point], i: usize) -> (BigInt, BigInt) {
    let x_i = BigInt::from(points[i].x);
    let mut numerator = BigInt::one();
    let mut denominator = BigInt::one();
    for (j, point) in points.iter().enumerate() {
        if i == j {
            continue;
        }
        let x_j = BigInt::from(point.x);
        denominator *= &x_i - &x_j;
        numerator *= -x_j;
    }
    (numerator, denominator)
}
