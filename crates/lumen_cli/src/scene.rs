//! Scene descriptions: JSON scene files and built-in presets.
//!
//! A description names its materials once and lets spheres refer to them by
//! name, so every sphere using a material shares one instance.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use lumen_renderer::{
    Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal, Scene, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Camera placement. Everything but the field of view is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub vup: [f32; 3],
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            vfov: 90.0,
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            vup: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian { albedo: [f32; 3] },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric { refractive_index: f32 },
}

impl MaterialDesc {
    fn build(&self) -> Result<Arc<dyn Material>> {
        let material: Arc<dyn Material> = match *self {
            MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(Color::from(albedo))),
            MaterialDesc::Metal { albedo, fuzz } => {
                Arc::new(Metal::new(Color::from(albedo), fuzz)?)
            }
            MaterialDesc::Dielectric { refractive_index } => {
                Arc::new(Dielectric::new(refractive_index)?)
            }
        };
        Ok(material)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: [f32; 3],
    /// Negative radii produce inward-facing shells
    pub radius: f32,
    /// Key into [`SceneDescription::materials`]
    pub material: String,
}

/// A complete scene: camera, named materials and spheres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDesc,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Parse a JSON scene.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid scene description")
    }

    /// Load a JSON scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In scene file {}", path.display()))
    }

    fn add_material(&mut self, name: &str, material: MaterialDesc) {
        self.materials.insert(name.to_string(), material);
    }

    fn add_sphere(&mut self, center: [f32; 3], radius: f32, material: &str) {
        self.spheres.push(SphereDesc {
            center,
            radius,
            material: material.to_string(),
        });
    }

    /// Build the renderable scene and a camera for the given aspect ratio.
    pub fn build(&self, aspect_ratio: f32) -> Result<(Scene, Camera)> {
        let mut materials: BTreeMap<&str, Arc<dyn Material>> = BTreeMap::new();
        for (name, desc) in &self.materials {
            let material = desc
                .build()
                .with_context(|| format!("Material `{name}` is invalid"))?;
            materials.insert(name.as_str(), material);
        }

        let mut world = HittableList::new();
        for (n, sphere) in self.spheres.iter().enumerate() {
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| anyhow!("Sphere {n} uses unknown material `{}`", sphere.material))?;
            let sphere = Sphere::new(Vec3::from(sphere.center), sphere.radius, Arc::clone(material))
                .with_context(|| format!("Sphere {n} is invalid"))?;
            world.add(Box::new(sphere));
        }

        let camera = Camera::look_at(
            Vec3::from(self.camera.look_from),
            Vec3::from(self.camera.look_at),
            Vec3::from(self.camera.vup),
            self.camera.vfov,
            aspect_ratio,
        )
        .context("Invalid camera")?;

        log::info!(
            "Built scene with {} spheres and {} materials",
            world.len(),
            materials.len()
        );
        Ok((world, camera))
    }
}

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// A blue and a red diffuse sphere touching at the centre of view
    TwoSpheres,
    /// Ground, diffuse centre, hollow glass left, polished metal right
    Materials,
    /// A field of small random spheres around three large ones
    Random,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::TwoSpheres, Preset::Materials, Preset::Random];

    pub fn name(self) -> &'static str {
        match self {
            Preset::TwoSpheres => "two-spheres",
            Preset::Materials => "materials",
            Preset::Random => "random",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Build the description. Only `Random` uses the seed.
    pub fn description(self, seed: u64) -> SceneDescription {
        match self {
            Preset::TwoSpheres => two_spheres(),
            Preset::Materials => materials(),
            Preset::Random => random_spheres(seed),
        }
    }
}

/// Where the scene comes from: a preset name or a JSON file path.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneSource {
    Preset(Preset),
    File(std::path::PathBuf),
}

impl SceneSource {
    pub fn parse(arg: &str) -> Self {
        match Preset::from_name(arg) {
            Some(preset) => SceneSource::Preset(preset),
            None => SceneSource::File(arg.into()),
        }
    }

    pub fn load(&self, seed: u64) -> Result<SceneDescription> {
        match self {
            SceneSource::Preset(preset) => Ok(preset.description(seed)),
            SceneSource::File(path) => SceneDescription::load(path),
        }
    }
}

fn two_spheres() -> SceneDescription {
    let radius = std::f32::consts::FRAC_PI_4.cos();
    let mut scene = SceneDescription::default();
    scene.add_material("left", MaterialDesc::Lambertian { albedo: [0.0, 0.0, 1.0] });
    scene.add_material("right", MaterialDesc::Lambertian { albedo: [1.0, 0.0, 0.0] });
    scene.add_sphere([-radius, 0.0, -1.0], radius, "left");
    scene.add_sphere([radius, 0.0, -1.0], radius, "right");
    scene
}

fn materials() -> SceneDescription {
    let mut scene = SceneDescription::default();
    scene.add_material("ground", MaterialDesc::Lambertian { albedo: [0.8, 0.8, 0.0] });
    scene.add_material("center", MaterialDesc::Lambertian { albedo: [0.1, 0.2, 0.5] });
    scene.add_material("glass", MaterialDesc::Dielectric { refractive_index: 1.5 });
    scene.add_material(
        "gold",
        MaterialDesc::Metal {
            albedo: [0.8, 0.6, 0.2],
            fuzz: 0.0,
        },
    );

    scene.add_sphere([0.0, -100.5, -1.0], 100.0, "ground");
    scene.add_sphere([0.0, 0.0, -1.0], 0.5, "center");
    // Hollow glass: outer shell plus an inverted inner surface
    scene.add_sphere([-1.0, 0.0, -1.0], 0.5, "glass");
    scene.add_sphere([-1.0, 0.0, -1.0], -0.4, "glass");
    scene.add_sphere([1.0, 0.0, -1.0], 0.5, "gold");
    scene
}

fn random_spheres(seed: u64) -> SceneDescription {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = SceneDescription {
        camera: CameraDesc {
            vfov: 20.0,
            look_from: [13.0, 2.0, 3.0],
            look_at: [0.0, 0.0, 0.0],
            vup: [0.0, 1.0, 0.0],
        },
        ..SceneDescription::default()
    };

    scene.add_material("ground", MaterialDesc::Lambertian { albedo: [0.5, 0.5, 0.5] });
    scene.add_material("glass", MaterialDesc::Dielectric { refractive_index: 1.5 });
    scene.add_material("brown", MaterialDesc::Lambertian { albedo: [0.4, 0.2, 0.1] });
    scene.add_material(
        "steel",
        MaterialDesc::Metal {
            albedo: [0.7, 0.6, 0.5],
            fuzz: 0.0,
        },
    );

    scene.add_sphere([0.0, -1000.0, 0.0], 1000.0, "ground");
    scene.add_sphere([0.0, 1.0, 0.0], 1.0, "glass");
    scene.add_sphere([-4.0, 1.0, 0.0], 1.0, "brown");
    scene.add_sphere([4.0, 1.0, 0.0], 1.0, "steel");

    for a in -5..5 {
        for b in -5..5 {
            let center = [
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            ];
            if (Vec3::from(center) - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            if choose_mat < 0.95 {
                let name = format!("small_{a}_{b}");
                let material = if choose_mat < 0.8 {
                    // Diffuse
                    let mut channel = || rng.gen::<f32>() * rng.gen::<f32>();
                    MaterialDesc::Lambertian {
                        albedo: [channel(), channel(), channel()],
                    }
                } else {
                    // Metal
                    let mut channel = || 0.5 + 0.5 * rng.gen::<f32>();
                    let albedo = [channel(), channel(), channel()];
                    MaterialDesc::Metal {
                        albedo,
                        fuzz: 0.5 * rng.gen::<f32>(),
                    }
                };
                scene.add_material(&name, material);
                scene.add_sphere(center, 0.2, &name);
            } else {
                // Glass shares the single dielectric instance
                scene.add_sphere(center, 0.2, "glass");
            }
        }
    }

    scene
}
