//! Domain types for the station registry.
//!
//! This module contains the validated identifier types the pipeline is
//! built around. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod operator;
mod station;
mod tiploc;

pub use operator::{AtocCode, InvalidAtocCode, operator_name};
pub use station::{Crs, InvalidCrs};
pub use tiploc::{InvalidTiploc, Tiploc};
