//! Display adapters for POV-Ray literals.
//!
//! Numbers use Rust's shortest round-trip representation, which never
//! switches to exponent notation and prints integral values without a
//! fractional part. Magnitudes near the ends of the `f64` range therefore
//! print with hundreds of digits (`1e200` is a `1` followed by 200 zeros).

use std::fmt::{
    Display,
    Formatter,
    Result,
};

use nalgebra::Vector3;
use palette::Srgb;

/// Format a vector as `<x,y,z>`
pub fn vector(vector: &Vector3<f64>) -> FormatVector {
    FormatVector { xyz: (*vector).into() }
}

/// Format a colour as `rgb <r,g,b>`
pub fn rgb(color: &Srgb<f64>) -> FormatRgb {
    FormatRgb { color: *color }
}

/// Format a flag as POV-Ray's `1` or `0`
pub fn flag(value: bool) -> u8 {
    u8::from(value)
}

#[derive(Clone, Copy, Debug)]
pub struct FormatVector {
    pub xyz: [f64; 3],
}

impl Display for FormatVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let [x, y, z] = self.xyz;
        write!(f, "<{x},{y},{z}>")
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FormatRgb {
    pub color: Srgb<f64>,
}

impl Display for FormatRgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let (red, green, blue) = self.color.into_components();
        write!(f, "rgb <{red},{green},{blue}>")
    }
}
