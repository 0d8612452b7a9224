//! The core of the mv3d model viewer. This crate contains everything the
//! viewer needs that does not touch a GPU: model import, triangle mesh data
//! and its spatial metadata, camera and lighting state, the per-frame
//! transform composition, and the interleaved vertex layouts the renderer
//! uploads.

pub mod camera;
pub mod import;
pub mod mesh;
pub mod vertex;
