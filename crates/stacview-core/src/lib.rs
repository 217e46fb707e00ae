pub mod config;
pub mod logging;

pub mod fetch;
pub mod links;
pub mod origin;
pub mod resource;
pub mod viewer;
