use nalgebra::Vector3;
use palette::{
    FromColor,
    Hsl,
    Srgb,
    encoding,
};

/// Colour passed to the `spinm<N>` macro for each atom.
///
/// The macro only uses it when the material has `spincolors` enabled.
pub trait SpinColor {
    fn spin_color(&self, spin: &Vector3<f64>) -> Srgb<f64>;
}

impl<F> SpinColor for F
where
    F: Fn(&Vector3<f64>) -> Srgb<f64>,
{
    fn spin_color(&self, spin: &Vector3<f64>) -> Srgb<f64> {
        self(spin)
    }
}

/// Same colour for every spin. Defaults to blue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedColor(pub Srgb<f64>);

impl Default for FixedColor {
    fn default() -> Self {
        Self(Srgb::new(0.0, 0.0, 1.0))
    }
}

impl SpinColor for FixedColor {
    fn spin_color(&self, _spin: &Vector3<f64>) -> Srgb<f64> {
        self.0
    }
}

/// In-plane angle of the spin selects the hue, the z component the
/// lightness: +z is white, -z is black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpinHue;

impl SpinColor for SpinHue {
    fn spin_color(&self, spin: &Vector3<f64>) -> Srgb<f64> {
        let hue = spin.y.atan2(spin.x).to_degrees();
        let lightness = (0.5 + 0.5 * spin.z).clamp(0.0, 1.0);
        Srgb::from_color(Hsl::<encoding::Srgb, f64>::new(hue, 1.0, lightness))
    }
}
