//! Basins of attraction: which root each starting point of the plane is
//! carried to by a complex root-finding iteration.

pub mod algorithm;
pub mod palette;
pub mod root_registry;
