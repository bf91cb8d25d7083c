use nalgebra::Vector3;
use palette::Srgb;

#[cfg(feature = "serde")]
use crate::Error;

/// How the atoms of one material are drawn.
///
/// Each field becomes a `#declare` in the scene file (or a constant in the
/// macro body), so the look of a material can be tweaked there after export.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaterialStyle {
    /// Length of spin glyphs (`sscale`). Arrows and cones span this length
    /// centered on the atom.
    pub spin_scale: f64,

    /// Sphere diameter (`rscale`)
    pub sphere_scale: f64,

    /// Cube edge length (`cscale`)
    pub cube_scale: f64,

    pub spheres: bool,
    pub cubes: bool,
    pub cones: bool,
    pub arrows: bool,

    /// Arrow shaft radius, relative to `spin_scale`
    pub arrow_shaft_radius: f64,

    /// Arrow head base radius, relative to `spin_scale`
    pub arrow_head_radius: f64,

    /// Distance of the arrow tip from the atom, in half spin lengths
    pub arrow_tip: f64,

    /// Colour atoms with the per-atom colour from the frame file. Otherwise
    /// `material_color` is used.
    pub spin_colors: bool,

    #[cfg_attr(feature = "serde", serde(with = "palette::serde::as_array"))]
    pub material_color: Srgb<f64>,
}

impl Default for MaterialStyle {
    fn default() -> Self {
        Self {
            spin_scale: 2.0,
            sphere_scale: 1.2,
            cube_scale: 3.54,
            spheres: true,
            cubes: false,
            cones: false,
            arrows: true,
            arrow_shaft_radius: 0.12,
            arrow_head_radius: 0.2,
            arrow_tip: 1.6,
            spin_colors: true,
            material_color: Srgb::new(0.1, 0.1, 0.1),
        }
    }
}

/// Global rendering settings of the scene file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneSettings {
    /// Library files included at the top of the scene. `screen.inc` provides
    /// the `Set_Camera` macros.
    #[cfg_attr(feature = "serde", serde(default = "default_includes"))]
    pub includes: Vec<String>,

    #[cfg_attr(feature = "serde", serde(default = "default_reflection"))]
    pub reflection: f64,

    #[cfg_attr(feature = "serde", serde(default = "default_assumed_gamma"))]
    pub assumed_gamma: f64,

    #[cfg_attr(
        feature = "serde",
        serde(
            default = "default_background_color",
            with = "palette::serde::as_array"
        )
    )]
    pub background_color: Srgb<f64>,

    /// Camera distance from the origin, in multiples of the system's diagonal
    #[cfg_attr(feature = "serde", serde(default = "default_camera_distance"))]
    pub camera_distance: f64,

    /// Field of view, in degrees
    #[cfg_attr(feature = "serde", serde(default = "default_camera_angle"))]
    pub camera_angle: f64,

    #[cfg_attr(feature = "serde", serde(default = "default_camera_aspect"))]
    pub camera_aspect: [u32; 2],

    /// Up direction of the camera
    #[cfg_attr(feature = "serde", serde(default = "default_camera_sky"))]
    pub camera_sky: Vector3<f64>,

    /// Light distance from the origin, in multiples of the camera distance
    #[cfg_attr(feature = "serde", serde(default = "default_light_distance"))]
    pub light_distance: f64,

    #[cfg_attr(
        feature = "serde",
        serde(default = "default_light_color", with = "palette::serde::as_array")
    )]
    pub light_color: Srgb<f64>,

    /// Style for materials without an entry in `materials`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_material: MaterialStyle,

    /// Per-material styles, indexed by material.
    #[cfg_attr(feature = "serde", serde(default))]
    pub materials: Vec<MaterialStyle>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            reflection: default_reflection(),
            assumed_gamma: default_assumed_gamma(),
            background_color: default_background_color(),
            camera_distance: default_camera_distance(),
            camera_angle: default_camera_angle(),
            camera_aspect: default_camera_aspect(),
            camera_sky: default_camera_sky(),
            light_distance: default_light_distance(),
            light_color: default_light_color(),
            default_material: Default::default(),
            materials: vec![],
        }
    }
}

impl SceneSettings {
    pub fn material_style(&self, material: u32) -> &MaterialStyle {
        self.materials
            .get(material as usize)
            .unwrap_or(&self.default_material)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        Ok(toml::from_str(toml)?)
    }

    #[cfg(feature = "serde")]
    pub fn to_toml_string(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn default_includes() -> Vec<String> {
    ["colors.inc", "metals.inc", "screen.inc"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}

fn default_reflection() -> f64 {
    0.5
}

fn default_assumed_gamma() -> f64 {
    2.0
}

fn default_background_color() -> Srgb<f64> {
    // Gray30 from colors.inc
    Srgb::new(0.3, 0.3, 0.3)
}

fn default_camera_distance() -> f64 {
    6.0
}

fn default_camera_angle() -> f64 {
    15.0
}

fn default_camera_aspect() -> [u32; 2] {
    [4, 3]
}

fn default_camera_sky() -> Vector3<f64> {
    Vector3::z()
}

fn default_light_distance() -> f64 {
    2.0
}

fn default_light_color() -> Srgb<f64> {
    Srgb::new(1.0, 1.0, 1.0)
}
