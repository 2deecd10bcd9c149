//! Domain layer - entities and value types

pub mod entities;
