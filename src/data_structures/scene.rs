//! The scene: an ordered list of cubes built from a plain-data description.

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::data_structures::cube::{Cube, CubeInstanceData};

/// One cube of a [`SceneDescription`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubeDescriptor {
    pub position: [f32; 3],
    /// RGBA, each channel in [0, 1].
    pub color: [f32; 4],
}

impl CubeDescriptor {
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub cubes: Vec<CubeDescriptor>,
}

impl SceneDescription {
    pub fn validate(&self) -> Result<()> {
        for (idx, cube) in self.cubes.iter().enumerate() {
            ensure!(
                cube.position.iter().chain(cube.color.iter()).all(|v| v.is_finite()),
                "cube {} has a non-finite position or colour: {:?}",
                idx,
                cube
            );
        }
        Ok(())
    }
}

impl Default for SceneDescription {
    /// Red, green, blue and yellow cubes spread around the origin.
    fn default() -> Self {
        Self {
            cubes: vec![
                CubeDescriptor::new([0.2, 0.0, 0.0], [1.0, 0.0, 0.0, 1.0]),
                CubeDescriptor::new([0.0, 0.2, 0.0], [0.0, 1.0, 0.0, 1.0]),
                CubeDescriptor::new([0.0, 0.0, -0.2], [0.0, 0.0, 1.0, 1.0]),
                CubeDescriptor::new([0.0, 0.0, 0.0], [1.0, 1.0, 0.0, 1.0]),
            ],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    cubes: Vec<Cube>,
}

impl Scene {
    pub fn from_description(description: &SceneDescription) -> Self {
        let cubes = description
            .cubes
            .iter()
            .map(|d| Cube::new(d.position.into(), d.color.into()))
            .collect();
        Self { cubes }
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Advance every cube by one step and collect the instance records in scene order.
    pub fn update_transforms(&mut self, aspect: f32) -> Vec<CubeInstanceData> {
        self.cubes
            .iter_mut()
            .map(|cube| cube.update_transform(aspect))
            .collect()
    }
}

impl From<&SceneDescription> for Scene {
    fn from(description: &SceneDescription) -> Self {
        Self::from_description(description)
    }
}
