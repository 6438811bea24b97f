//! Request handlers, one module per resource.

pub mod auth;
pub mod cart;
pub mod category;
pub mod order;
pub mod product;
