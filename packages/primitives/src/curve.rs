//! Toy elliptic curve `y² = x³ + x + 8` over F₃₈₅₁.
//!
//! The group has prime order 3847 and is generated by `(4, 991)`, so every
//! finite point other than infinity generates it. Far too small for real
//! use; sized so a person can follow the numbers.

use cipherbench_core::crypto::provider::CurvePrimitive;
use cipherbench_core::{Config, ProviderError};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand::Rng;

pub const FIELD_PRIME: u64 = 3851;
pub const COEFF_A: u64 = 1;
pub const COEFF_B: u64 = 8;
pub const GROUP_ORDER: u64 = 3847;
pub const GENERATOR: Point = Point::Affine(4, 991);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine(u64, u64),
}

fn mod_pow(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    result
}

fn inverse(value: u64) -> u64 {
    mod_pow(value, FIELD_PRIME - 2, FIELD_PRIME)
}

fn sub(a: u64, b: u64) -> u64 {
    (a + FIELD_PRIME - b % FIELD_PRIME) % FIELD_PRIME
}

impl Point {
    /// Lifts user-supplied coordinates, rejecting anything not on the curve.
    pub fn from_coordinates(x: &BigUint, y: &BigUint) -> Result<Self, ProviderError> {
        let not_on_curve = || ProviderError::InvalidInput(format!("({}, {}) is not on the curve", x, y));
        let x = x.to_u64().filter(|&v| v < FIELD_PRIME).ok_or_else(not_on_curve)?;
        let y = y.to_u64().filter(|&v| v < FIELD_PRIME).ok_or_else(not_on_curve)?;

        let point = Point::Affine(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(not_on_curve())
        }
    }

    pub fn is_on_curve(&self) -> bool {
        match *self {
            Point::Infinity => true,
            Point::Affine(x, y) => {
                let lhs = y * y % FIELD_PRIME;
                let rhs = (x * x % FIELD_PRIME * x + COEFF_A * x + COEFF_B) % FIELD_PRIME;
                lhs == rhs
            }
        }
    }

    pub fn add(self, other: Point) -> Point {
        let (x1, y1, x2, y2) = match (self, other) {
            (Point::Infinity, p) | (p, Point::Infinity) => return p,
            (Point::Affine(x1, y1), Point::Affine(x2, y2)) => (x1, y1, x2, y2),
        };

        if x1 == x2 && (y1 + y2) % FIELD_PRIME == 0 {
            return Point::Infinity;
        }

        let slope = if x1 == x2 {
            (3 * x1 * x1 + COEFF_A) % FIELD_PRIME * inverse(2 * y1 % FIELD_PRIME) % FIELD_PRIME
        } else {
            sub(y2, y1) * inverse(sub(x2, x1)) % FIELD_PRIME
        };

        let x3 = sub(sub(slope * slope % FIELD_PRIME, x1), x2);
        let y3 = sub(slope * sub(x1, x3) % FIELD_PRIME, y1);
        Point::Affine(x3, y3)
    }

    /// Double-and-add. The scalar is reduced modulo the group order first.
    pub fn multiply(self, scalar: &BigUint) -> Point {
        let mut k = (scalar % GROUP_ORDER).to_u64().unwrap_or(0);
        let mut result = Point::Infinity;
        let mut addend = self;
        while k > 0 {
            if k & 1 == 1 {
                result = result.add(addend);
            }
            addend = addend.add(addend);
            k >>= 1;
        }
        result
    }
}

pub(crate) fn random_scalar() -> BigUint {
    BigUint::from(rand::thread_rng().gen_range(Config::global().curve_private_range()))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ToyCurve;

impl CurvePrimitive for ToyCurve {
    fn generate_keys(&self) -> Result<String, ProviderError> {
        let private = random_scalar();
        match GENERATOR.multiply(&private) {
            Point::Affine(x, y) => Ok(format!("{},{},{}", private, x, y)),
            Point::Infinity => Err(ProviderError::KeyGeneration(
                "Private scalar is a multiple of the group order".to_string(),
            )),
        }
    }

    fn compute_secret(
        &self,
        own_private: &BigUint,
        x: &BigUint,
        y: &BigUint,
    ) -> Result<String, ProviderError> {
        match Point::from_coordinates(x, y)?.multiply(own_private) {
            Point::Affine(x, _) => Ok(x.to_string()),
            Point::Infinity => Err(ProviderError::InvalidInput(
                "Shared point is at infinity".to_string(),
            )),
        }
    }
}
