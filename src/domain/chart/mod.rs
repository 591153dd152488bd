//! Bar chart value objects, the handle entity and the pure mapping from flow points.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
