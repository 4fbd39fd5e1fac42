pub mod adapters;
pub mod configuration;
pub mod controller;
pub mod core;
pub mod utils;
pub mod validation;
