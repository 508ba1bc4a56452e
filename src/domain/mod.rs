pub mod collections;
pub mod entities;
pub mod error;
