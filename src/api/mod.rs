pub mod auth;
pub mod files;
pub mod products;
pub mod seed;
