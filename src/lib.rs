//! RWI Builder - compose documents from bracket-delimited components
//!
//! A workspace holds an ordered list of named components. Active components
//! are concatenated, each wrapped in its own delimiters, into one document.
//! A pinned index component at the top is regenerated after every change
//! and describes the other active components.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Component, Direction, Registry, RegistryError, Theme};
