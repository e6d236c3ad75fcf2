//! Data structures: cubes, the cube mesh, the scene and textures.
//!
//! - `cube` holds a single rotating cube and its per-instance GPU record
//! - `mesh` builds and uploads the shared 36-vertex cube mesh
//! - `scene` turns a plain-data scene description into cubes
//! - `texture` contains the depth attachment wrapper

pub mod cube;
pub mod mesh;
pub mod scene;
pub mod texture;
