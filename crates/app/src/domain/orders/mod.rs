//! Orders

pub mod billing;
pub mod data;
pub mod errors;
pub mod payment;
pub mod records;
mod repositories;
pub mod service;
pub mod status;
pub mod validation;

pub use errors::OrdersServiceError;
pub use service::*;
