pub mod budget;
pub mod context;
pub mod csrf;
pub mod entity;
mod error;
pub mod models;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::RecordError;
