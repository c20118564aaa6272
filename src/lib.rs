//! Generator for a parametric **SBC Gen-I (350) to Jeep AX-15** adapter plate.
//!
//! The plate is produced by **Constructive Solid Geometry (CSG)**: a solid
//! cylinder has a center bore and twelve bolt holes subtracted from it, each
//! subtraction a boolean difference on polygon sets stored in [BSP](mesh::bsp)
//! trees. The result is written out as STL.
//!
//! ```no_run
//! use adapter_plate::adapter::{build_adapter, Dimensions};
//! use adapter_plate::io::StlFormat;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let plate = build_adapter(&Dimensions::default())?;
//! plate.export_to_file("SBC_to_AX15_adapter.stl", StlFormat::Binary)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod adapter;
pub mod cli;
pub mod config;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod prompt;
pub mod traits;
pub mod triangulated;

pub use adapter::{Dimensions, Feature, build_adapter};
pub use mesh::Mesh;
pub use traits::CSGOps;
