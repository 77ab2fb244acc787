/// Complex amplitude arithmetic.
///
/// An amplitude is a plain real/imaginary pair with value semantics. Only the
/// operations the simulator needs are provided; NaN and infinities propagate
/// under ordinary IEEE rules and are never special-cased.
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[inline(always)]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Real-valued amplitude (imaginary part zero).
    #[inline(always)]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self { re: 0.0, im: 0.0 }
    }

    #[inline(always)]
    pub const fn one() -> Self {
        Self { re: 1.0, im: 0.0 }
    }

    /// Squared magnitude |z|², the probability weight of an amplitude.
    #[inline(always)]
    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline(always)]
    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// r·e^(iθ)
    #[inline(always)]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Both components rounded to 6 fractional digits, as shown to users.
    pub fn rounded(&self) -> Self {
        Self::new(round6(self.re), round6(self.im))
    }
}

pub(crate) fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

impl Add for Complex {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl AddAssign for Complex {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl Sub for Complex {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

/// (a + bi)(c + di) = (ac − bd) + (ad + bc)i
impl Mul for Complex {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// Approximate equality, tolerance 1e-10 per component.
impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        (self.re - other.re).abs() < 1e-10 && (self.im - other.im).abs() < 1e-10
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::real(re)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{:.6} - {:.6}i", self.re, -self.im)
        } else {
            write!(f, "{:.6} + {:.6}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_add_and_sub() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -4.0);
        assert_eq!(a + b, Complex::new(4.0, -2.0));
        assert_eq!(a - b, Complex::new(-2.0, 6.0));
    }

    #[test]
    fn test_mul_is_complex_product() {
        // (1 + 2i)(3 + 4i) = -5 + 10i, not the element-wise (3, 8)
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, 4.0);
        assert_eq!(a * b, Complex::new(-5.0, 10.0));
    }

    #[test]
    fn test_conj_product_is_norm_sq() {
        let z = Complex::new(3.0, 4.0);
        assert_eq!(z * z.conj(), Complex::real(25.0));
        assert!((z.norm_sq() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_defaults_imaginary_to_zero() {
        let z: Complex = 2.5.into();
        assert_eq!(z.re, 2.5);
        assert_eq!(z.im, 0.0);
    }

    #[test]
    fn test_from_polar() {
        let z = Complex::from_polar(1.0, PI / 2.0);
        assert_eq!(z, Complex::new(0.0, 1.0));
    }

    #[test]
    fn test_add_assign_accumulates() {
        let mut acc = Complex::zero();
        for _ in 0..4 {
            acc += Complex::new(0.25, -0.5);
        }
        assert_eq!(acc, Complex::new(1.0, -2.0));
    }

    #[test]
    fn test_nan_propagates() {
        let z = Complex::new(f64::NAN, 0.0) * Complex::one();
        assert!(z.re.is_nan());
    }

    #[test]
    fn test_rounded() {
        let z = Complex::new(0.70710678, -0.1234564);
        let r = z.rounded();
        assert!((r.re - 0.707107).abs() < 1e-12);
        assert!((r.im + 0.123456).abs() < 1e-12);
    }

    #[test]
    fn test_display_sign() {
        assert_eq!(Complex::new(1.0, -0.5).to_string(), "1.000000 - 0.500000i");
        assert_eq!(Complex::new(0.0, 0.5).to_string(), "0.000000 + 0.500000i");
    }
}
