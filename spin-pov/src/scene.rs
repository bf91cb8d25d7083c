use std::{
    fmt,
    fs::File,
    io::BufWriter,
    path::{
        Path,
        PathBuf,
    },
};

use nalgebra::Vector3;

use crate::{
    Error,
    camera::CameraPlacement,
    format::{
        flag,
        rgb,
        vector,
    },
    io::write_with,
    naming::{
        FRAME_NUMBER_VARIABLE,
        SCENE_FILE_NAME,
        frame_file_name_expression,
    },
    style::{
        MaterialStyle,
        SceneSettings,
    },
};

/// What the scene file needs to know about the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneDescription {
    /// Size of the system's bounding box
    pub extents: Vector3<f64>,

    /// First and last frame, declared for reference only. POV-Ray's animation
    /// options select what is rendered.
    pub start_frame: u32,
    pub final_frame: u32,

    pub num_materials: u32,
}

/// Writes the POV-Ray scene file: camera, light and one `spinm<N>` macro
/// per material.
#[derive(Clone, Debug, Default)]
pub struct SceneComposer {
    settings: SceneSettings,
}

impl SceneComposer {
    pub fn new(settings: SceneSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn camera(&self, extents: &Vector3<f64>) -> Result<CameraPlacement, Error> {
        CameraPlacement::frame_extents(extents, self.settings.camera_distance)
    }

    /// Writes the scene into `out`. Nothing is written if the extents are
    /// degenerate.
    pub fn write_scene<W>(&self, scene: &SceneDescription, out: &mut W) -> Result<(), Error>
    where
        W: fmt::Write,
    {
        let camera = self.camera(&scene.extents)?;
        self.write_scene_with_camera(&camera, scene, out)?;
        Ok(())
    }

    /// Writes [`SCENE_FILE_NAME`] into `dir`, replacing any existing file.
    pub fn compose_scene(
        &self,
        dir: impl AsRef<Path>,
        scene: &SceneDescription,
    ) -> Result<PathBuf, Error> {
        // fail on degenerate extents before the file is created
        let camera = self.camera(&scene.extents)?;

        let path = dir.as_ref().join(SCENE_FILE_NAME);
        tracing::info!(
            path = %path.display(),
            num_materials = scene.num_materials,
            position = ?camera.position,
            "Writing povray scene"
        );

        let writer = BufWriter::new(File::create(&path)?);
        let writer = write_with(writer, |out| {
            self.write_scene_with_camera(&camera, scene, out)
        })?;
        writer.into_inner().map_err(|error| error.into_error())?;

        Ok(path)
    }

    fn write_scene_with_camera<W>(
        &self,
        camera: &CameraPlacement,
        scene: &SceneDescription,
        out: &mut W,
    ) -> fmt::Result
    where
        W: fmt::Write,
    {
        let settings = &self.settings;

        writeln!(
            out,
            "//-------------------------------------------------------------------------"
        )?;
        writeln!(out, "// Povray file generated by spin-pov")?;
        writeln!(
            out,
            "//-------------------------------------------------------------------------"
        )?;

        for include in &settings.includes {
            writeln!(out, "#include \"{include}\"")?;
        }

        let [lx, ly, lz]: [f64; 3] = camera.look_at.coords.into();
        let [cx, cy, cz]: [f64; 3] = camera.position.coords.into();
        writeln!(out, "#declare LX={lx};")?;
        writeln!(out, "#declare LY={ly};")?;
        writeln!(out, "#declare LZ={lz};")?;
        writeln!(out, "#declare CX={cx};")?;
        writeln!(out, "#declare CY={cy};")?;
        writeln!(out, "#declare CZ={cz};")?;
        writeln!(out, "#declare ref={};", settings.reflection)?;
        writeln!(
            out,
            "global_settings {{ assumed_gamma {} }}",
            settings.assumed_gamma
        )?;
        writeln!(
            out,
            "background {{ color {} }}",
            rgb(&settings.background_color)
        )?;

        let [aspect_width, aspect_height] = settings.camera_aspect;
        writeln!(
            out,
            "Set_Camera(<CX,CY,CZ>, <LX,LY,LZ>, {})",
            settings.camera_angle
        )?;
        writeln!(out, "Set_Camera_Aspect({aspect_width},{aspect_height})")?;
        writeln!(out, "Set_Camera_Sky({})", vector(&settings.camera_sky))?;

        let light = settings.light_distance;
        writeln!(
            out,
            "light_source {{ <{light}*CX, {light}*CY, {light}*CZ> color {} }}",
            rgb(&settings.light_color)
        )?;

        writeln!(out, "#declare Initial_Frame = {};", scene.start_frame)?;
        writeln!(out, "#declare Final_Frame = {};", scene.final_frame)?;

        for material in 0..scene.num_materials {
            write_material(material, settings.material_style(material), out)?;
        }

        writeln!(
            out,
            "#include {}",
            frame_file_name_expression(FRAME_NUMBER_VARIABLE)
        )
    }
}

/// Writes the parameters and the `spinm<material>` macro for one material.
///
/// The macro takes the atom position, the spin and the per-atom colour.
fn write_material<W>(material: u32, style: &MaterialStyle, out: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    let i = material;

    writeln!(out, "#declare sscale{i}={};", style.spin_scale)?;
    writeln!(out, "#declare rscale{i}={};", style.sphere_scale)?;
    writeln!(out, "#declare cscale{i}={};", style.cube_scale)?;
    writeln!(out, "#declare cones{i}={};", flag(style.cones))?;
    writeln!(out, "#declare arrows{i}={};", flag(style.arrows))?;
    writeln!(out, "#declare spheres{i}={};", flag(style.spheres))?;
    writeln!(out, "#declare cubes{i}={};", flag(style.cubes))?;
    writeln!(out, "#declare spincolors{i}={};", flag(style.spin_colors))?;
    writeln!(
        out,
        "#declare spincolor{i}=pigment {{color {}}};",
        rgb(&style.material_color)
    )?;

    writeln!(out, "#macro spinm{i}(cx,cy,cz,sx,sy,sz,cr,cg,cb)")?;
    writeln!(out, "union{{")?;

    writeln!(
        out,
        "#if(spheres{i}) sphere {{<cx,cy,cz>,0.5*rscale{i}}} #end"
    )?;

    let half_cube = format!("cscale{i}*0.5");
    writeln!(
        out,
        "#if(cubes{i}) box {{<cx-{half_cube},cy-{half_cube},cz-{half_cube}>,<cx+{half_cube},cy+{half_cube},cz+{half_cube}>}} #end"
    )?;

    let half_spin = format!("0.5*sscale{i}");
    writeln!(
        out,
        "#if(cones{i}) cone {{{},0,{},sscale{i}*0.5}} #end",
        along_spin('+', &half_spin),
        along_spin('-', &half_spin),
    )?;

    let tip = format!("{}*0.5*sscale{i}", style.arrow_tip);
    writeln!(
        out,
        "#if(arrows{i}) cylinder {{{},{},sscale{i}*{}}} cone {{{},0,{},sscale{i}*{}}} #end",
        along_spin('+', &half_spin),
        along_spin('-', &half_spin),
        style.arrow_shaft_radius,
        along_spin('+', &tip),
        along_spin('+', &half_spin),
        style.arrow_head_radius,
    )?;

    writeln!(
        out,
        "#if(spincolors{i}) texture {{ pigment {{color rgb <cr,cg,cb>}} finish {{reflection {{ref}} diffuse 1 ambient 0}}}}"
    )?;
    writeln!(
        out,
        "#else texture {{ pigment {{spincolor{i}}} finish {{reflection {{ref}} diffuse 1 ambient 0}}}} #end"
    )?;

    writeln!(out, "}}")?;
    writeln!(out, "#end")
}

/// `<cx±sx*distance,cy±sy*distance,cz±sz*distance>` inside a `spinm` macro
fn along_spin(sign: char, distance: &str) -> String {
    format!("<cx{sign}sx*{distance},cy{sign}sy*{distance},cz{sign}sz*{distance}>")
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use crate::{
        Error,
        naming::{
            FRAME_NUMBER_VARIABLE,
            frame_file_name,
            tests::eval_file_name_expression,
        },
        scene::{
            SceneComposer,
            SceneDescription,
            write_material,
        },
        style::{
            MaterialStyle,
            SceneSettings,
        },
    };

    fn scene(num_materials: u32) -> SceneDescription {
        SceneDescription {
            extents: Vector3::new(10.0, 20.0, 5.0),
            start_frame: 1,
            final_frame: 25,
            num_materials,
        }
    }

    fn render(composer: &SceneComposer, scene: &SceneDescription) -> String {
        let mut output = String::new();
        composer.write_scene(scene, &mut output).unwrap();
        output
    }

    fn render_material(material: u32, style: &MaterialStyle) -> String {
        let mut output = String::new();
        write_material(material, style, &mut output).unwrap();
        output
    }

    fn declared(output: &str, name: &str) -> f64 {
        let prefix = format!("#declare {name}=");
        output
            .lines()
            .find_map(|line| line.strip_prefix(&prefix))
            .and_then(|value| value.strip_suffix(';'))
            .unwrap_or_else(|| panic!("{name} not declared"))
            .parse()
            .unwrap()
    }

    #[test]
    fn it_writes_the_default_material_macro() {
        let expected = r#"#declare sscale0=2;
#declare rscale0=1.2;
#declare cscale0=3.54;
#declare cones0=0;
#declare arrows0=1;
#declare spheres0=1;
#declare cubes0=0;
#declare spincolors0=1;
#declare spincolor0=pigment {color rgb <0.1,0.1,0.1>};
#macro spinm0(cx,cy,cz,sx,sy,sz,cr,cg,cb)
union{
#if(spheres0) sphere {<cx,cy,cz>,0.5*rscale0} #end
#if(cubes0) box {<cx-cscale0*0.5,cy-cscale0*0.5,cz-cscale0*0.5>,<cx+cscale0*0.5,cy+cscale0*0.5,cz+cscale0*0.5>} #end
#if(cones0) cone {<cx+sx*0.5*sscale0,cy+sy*0.5*sscale0,cz+sz*0.5*sscale0>,0,<cx-sx*0.5*sscale0,cy-sy*0.5*sscale0,cz-sz*0.5*sscale0>,sscale0*0.5} #end
#if(arrows0) cylinder {<cx+sx*0.5*sscale0,cy+sy*0.5*sscale0,cz+sz*0.5*sscale0>,<cx-sx*0.5*sscale0,cy-sy*0.5*sscale0,cz-sz*0.5*sscale0>,sscale0*0.12} cone {<cx+sx*1.6*0.5*sscale0,cy+sy*1.6*0.5*sscale0,cz+sz*1.6*0.5*sscale0>,0,<cx+sx*0.5*sscale0,cy+sy*0.5*sscale0,cz+sz*0.5*sscale0>,sscale0*0.2} #end
#if(spincolors0) texture { pigment {color rgb <cr,cg,cb>} finish {reflection {ref} diffuse 1 ambient 0}}
#else texture { pigment {spincolor0} finish {reflection {ref} diffuse 1 ambient 0}} #end
}
#end
"#;
        assert_eq!(render_material(0, &MaterialStyle::default()), expected);
    }

    #[test]
    fn it_writes_one_macro_per_material() {
        let output = render(&SceneComposer::default(), &scene(3));

        assert_eq!(output.matches("#macro spinm").count(), 3);
        for material in 0..3 {
            let block = render_material(material, &MaterialStyle::default());
            assert!(output.contains(&block));
        }

        let first = output.find("#macro spinm0(").unwrap();
        let second = output.find("#macro spinm1(").unwrap();
        let third = output.find("#macro spinm2(").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn it_only_varies_the_material_index() {
        let names = [
            "spincolors",
            "spincolor",
            "spheres",
            "sscale",
            "rscale",
            "cscale",
            "cones",
            "arrows",
            "cubes",
            "spinm",
        ];
        let strip_index = |block: String, material: u32| {
            names.iter().fold(block, |block, name| {
                block.replace(&format!("{name}{material}"), &format!("{name}#"))
            })
        };

        let style = MaterialStyle::default();
        let reference = strip_index(render_material(0, &style), 0);
        for material in 1..10 {
            assert_eq!(
                strip_index(render_material(material, &style), material),
                reference
            );
        }
    }

    #[test]
    fn it_applies_per_material_styles() {
        let composer = SceneComposer::new(SceneSettings {
            materials: vec![MaterialStyle::default(), MaterialStyle {
                cubes: true,
                spin_scale: 1.5,
                ..Default::default()
            }],
            ..Default::default()
        });

        let output = render(&composer, &scene(3));
        assert!(output.contains("#declare cubes0=0;\n"));
        assert!(output.contains("#declare cubes1=1;\n"));
        assert!(output.contains("#declare sscale1=1.5;\n"));
        assert!(output.contains("#declare cubes2=0;\n"));
    }

    #[test]
    fn it_writes_global_settings() {
        let output = render(&SceneComposer::default(), &scene(1));

        for line in [
            "#include \"colors.inc\"",
            "#include \"metals.inc\"",
            "#include \"screen.inc\"",
            "#declare LX=0;",
            "#declare ref=0.5;",
            "global_settings { assumed_gamma 2 }",
            "background { color rgb <0.3,0.3,0.3> }",
            "Set_Camera(<CX,CY,CZ>, <LX,LY,LZ>, 15)",
            "Set_Camera_Aspect(4,3)",
            "Set_Camera_Sky(<0,0,1>)",
            "light_source { <2*CX, 2*CY, 2*CZ> color rgb <1,1,1> }",
            "#declare Initial_Frame = 1;",
            "#declare Final_Frame = 25;",
        ] {
            assert!(output.lines().any(|l| l == line), "missing line: {line}");
        }

        assert!(output.starts_with("//---"));
    }

    #[test]
    fn it_declares_the_camera_position() {
        let composer = SceneComposer::default();
        let scene = scene(0);
        let output = render(&composer, &scene);
        let camera = composer.camera(&scene.extents).unwrap();

        assert_eq!(declared(&output, "CX"), camera.position.x);
        assert_eq!(declared(&output, "CY"), camera.position.y);
        assert_eq!(declared(&output, "CZ"), camera.position.z);
        assert_eq!(declared(&output, "LZ"), 0.0);
    }

    #[test]
    fn it_ends_with_the_frame_include() {
        for num_materials in [0, 2] {
            let output = render(&SceneComposer::default(), &scene(num_materials));
            let last = output.lines().last().unwrap();
            assert_eq!(
                last,
                r#"#include concat("spins-", str(frame_number, -8, 0), ".inc")"#
            );

            let expression = last.strip_prefix("#include ").unwrap();
            assert_eq!(
                eval_file_name_expression(expression, FRAME_NUMBER_VARIABLE, 42),
                frame_file_name(42)
            );
        }
    }

    #[test]
    fn it_writes_no_materials_for_empty_material_sets() {
        let output = render(&SceneComposer::default(), &scene(0));
        assert!(!output.contains("#macro"));
        assert!(!output.contains("sscale"));
        assert!(output.ends_with(".inc\")\n"));
    }

    #[test]
    fn it_writes_nothing_for_degenerate_extents() {
        let mut output = String::new();
        let scene = SceneDescription {
            extents: Vector3::new(10.0, 0.0, 5.0),
            ..scene(1)
        };

        let result = SceneComposer::default().write_scene(&scene, &mut output);
        assert!(matches!(result, Err(Error::DegenerateExtents { .. })));
        assert!(output.is_empty());
    }
}
