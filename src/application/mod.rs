pub mod admin;
pub mod auth;
pub mod cache;
pub mod error;
pub mod repos;
pub mod site;
pub mod store;
