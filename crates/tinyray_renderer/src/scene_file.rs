//! JSON scene descriptions.
//!
//! A scene file holds optional camera settings, a table of named materials and a
//! list of spheres that refer to those materials by name. Spheres naming the same
//! material share one `Arc<Material>`.
//!
//! ```json
//! {
//!   "camera": { "vfov": 20, "look_from": [13, 2, 3], "look_at": [0, 0, 0] },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
//!     "glass": { "type": "dielectric", "refraction_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -1000, 0], "radius": 1000, "material": "ground" },
//!     { "center": [0, 1, 0], "radius": 1, "material": "glass" }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Camera, Color, HittableList, Material, Point3, Sphere, Vec3};

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {index} refers to unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid sphere {index}: {reason}")]
    InvalidSphere { index: usize, reason: String },
}

pub type SceneFileResult<T> = Result<T, SceneFileError>;

/// Camera section of a scene file. Missing fields take the camera defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub vfov: f32,
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub vup: [f32; 3],
    pub defocus_angle: f32,
    pub focus_dist: f32,
    pub gamma_correct: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            samples_per_pixel: camera.samples_per_pixel,
            max_depth: camera.max_depth,
            vfov: camera.vfov(),
            look_from: camera.look_from().to_array(),
            look_at: camera.look_at().to_array(),
            vup: camera.vup().to_array(),
            defocus_angle: camera.defocus_angle(),
            focus_dist: camera.focus_dist(),
            gamma_correct: camera.gamma_correct,
        }
    }
}

impl CameraSettings {
    /// Build an (uninitialized) camera from these settings.
    pub fn to_camera(&self) -> Camera {
        Camera::new()
            .with_quality(self.samples_per_pixel, self.max_depth)
            .with_position(
                Point3::from_array(self.look_from),
                Point3::from_array(self.look_at),
                Vec3::from_array(self.vup),
            )
            .with_lens(self.vfov, self.defocus_angle, self.focus_dist)
            .with_gamma(self.gamma_correct)
    }
}

/// A material entry, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refraction_index: f32,
    },
}

impl MaterialDesc {
    fn to_material(&self, name: &str) -> SceneFileResult<Material> {
        let invalid = |reason: &str| SceneFileError::InvalidMaterial {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        match *self {
            MaterialDesc::Lambertian { albedo } => {
                if !albedo.iter().all(|c| c.is_finite()) {
                    return Err(invalid("albedo must be finite"));
                }
                Ok(Material::lambertian(Color::from_array(albedo)))
            }
            MaterialDesc::Metal { albedo, fuzz } => {
                if !albedo.iter().all(|c| c.is_finite()) || !fuzz.is_finite() {
                    return Err(invalid("albedo and fuzz must be finite"));
                }
                Ok(Material::metal(Color::from_array(albedo), fuzz))
            }
            MaterialDesc::Dielectric { refraction_index } => {
                if !(refraction_index.is_finite() && refraction_index > 0.0) {
                    return Err(invalid("refraction_index must be a positive number"));
                }
                Ok(Material::dielectric(refraction_index))
            }
        }
    }
}

/// A sphere entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: String,
}

/// A whole scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneFile {
    /// Parse a scene from a JSON string.
    pub fn from_json(json: &str) -> SceneFileResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneFileResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&json)?;
        log::info!(
            "Loaded scene file {}: {} materials, {} spheres",
            path.display(),
            scene.materials.len(),
            scene.spheres.len()
        );
        Ok(scene)
    }

    /// Turn the description into a camera and a world.
    pub fn build(&self) -> SceneFileResult<(Camera, HittableList)> {
        let mut materials: HashMap<&str, Arc<Material>> = HashMap::new();
        for (name, desc) in &self.materials {
            materials.insert(name.as_str(), Arc::new(desc.to_material(name)?));
        }

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                SceneFileError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;

            if !sphere.center.iter().all(|c| c.is_finite()) {
                return Err(SceneFileError::InvalidSphere {
                    index,
                    reason: "center must be finite".to_string(),
                });
            }
            if !(sphere.radius.is_finite() && sphere.radius >= 0.0) {
                return Err(SceneFileError::InvalidSphere {
                    index,
                    reason: format!("radius {} is not a non-negative number", sphere.radius),
                });
            }

            world.add(Box::new(Sphere::new(
                Point3::from_array(sphere.center),
                sphere.radius,
                material.clone(),
            )));
        }

        if world.is_empty() {
            log::warn!("Scene has no spheres, only the sky will be visible");
        }

        Ok((self.camera.to_camera(), world))
    }
}

/// Load a scene file and build its camera and world.
pub fn load_scene(path: impl AsRef<Path>) -> SceneFileResult<(Camera, HittableList)> {
    SceneFile::load(path)?.build()
}
