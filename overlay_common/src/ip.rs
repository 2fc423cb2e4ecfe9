//! IP descriptors and driver contract.
//!
//! This module contains the types shared between the driver registry and
//! the overlay containers.

pub mod config;
pub mod consts;
pub mod descriptor;
pub mod driver;
