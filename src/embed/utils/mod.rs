//! Shared helpers for the embed generator.

pub mod path;
