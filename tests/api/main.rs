mod availability;
mod health_check;
mod sweep;
mod tables;
