//! # Domain Layer
//!
//! Provider identities, call outcomes and their logged form.

pub mod entities;
pub mod value_objects;
