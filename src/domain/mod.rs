//! Domain models for the RWI builder
//!
//! Contains the component registry and document assembly without any I/O
//! concerns.

mod component;
mod error;
mod registry;
mod theme;

pub use component::{
    Component, ComponentConfig, ComponentUpdate, NewComponent, INDEX_BEGIN, INDEX_END, INDEX_NAME,
};
pub use error::{BoundaryReason, RegistryError};
pub use registry::{Collision, Direction, Registry, RegistryEvent, INDEX_PREAMBLE};
pub use theme::Theme;
