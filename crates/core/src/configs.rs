//! Configuration file formats

pub mod recipe;
