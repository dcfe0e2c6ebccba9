//! Tread Core - Foundational types for the Tread controller
//!
//! This crate provides the types every other Tread crate depends on:
//! - `Vec3`, `Axis` - 3D vector math
//! - `Aabb` - axis-aligned boxes for static level geometry
//! - Error types and Result alias

mod aabb;
mod error;
mod types;

pub use aabb::Aabb;
pub use error::{Result, TreadError};
pub use types::{Axis, Vec3};
