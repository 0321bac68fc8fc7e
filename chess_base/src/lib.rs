//! # Base types for fenboard
//!
//! This is an auxiliary crate for `fenboard`, which contains coordinates, piece codes and
//! board-edge rays. Everything declared here knows nothing about boards.
//!
//! Normally you don't want to use this crate directly. Use `fenboard` instead.

pub mod geometry;
pub mod types;
