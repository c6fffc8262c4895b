//! Core resource definitions
//!
//! CPU-side descriptions of everything an overlay draws, independent of the
//! GPU implementation:
//! - Mesh: renderable unit with a declared name and a disposal flag
//! - Material: unlit overlay material
//! - Texture: decoded icon textures
//! - Geometry: line / triangle lists
//! - ResourcePool: handle-based registry with exactly-once disposal
//! - primitives: procedural gizmo shapes

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod pool;
pub mod primitives;
pub mod texture;

pub use geometry::{BoundingBox, Geometry};
pub use material::Material;
pub use mesh::{DestroyOptions, Mesh, MeshDisposeOptions};
pub use pool::{
    GeometryHandle, MaterialHandle, MeshHandle, PoolStats, ReleaseCounters, ResourcePool,
    TextureHandle,
};
pub use texture::Texture;
