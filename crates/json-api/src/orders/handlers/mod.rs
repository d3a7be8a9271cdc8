//! Order Handlers

pub(crate) mod create;
pub(crate) mod history;
pub(crate) mod index;
