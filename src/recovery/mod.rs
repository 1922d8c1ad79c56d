use num_bigint::BigInt;

pub mod decoder;
pub mod lagrange;

pub use decoder::{DecodeError, decode, encode};
pub use lagrange::{InterpolationError, constant_term};

/// A point of the secret polynomial: its value `y` at `x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: BigInt,
}

impl Point {
    pub fn new(x: i64, y: impl Into<BigInt>) -> Self {
        Self { x, y: y.into() }
    }
}
