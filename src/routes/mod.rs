mod availability;
mod health_check;
pub mod reservation;
pub mod tables;

pub use availability::*;
pub use health_check::*;
