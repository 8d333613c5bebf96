mod reservations;
mod tables;

pub use reservations::*;
pub use tables::*;
