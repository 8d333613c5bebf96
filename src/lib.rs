pub mod routes;
pub mod startup;
pub mod configuration;
pub mod telemetry;
pub mod utils;
pub mod schema;
pub mod models;
pub mod slots;
pub mod domain;
pub mod availability;
pub mod db_interaction;
pub mod sweeper;
