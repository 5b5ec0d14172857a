//! Command-line front end for the maser visibility model
//!
//! Shared argument groups and output writers used by the `maser_lightcurve`
//! and `kepler` binaries.

pub mod args;
pub mod output;
