pub mod lookup;
pub mod models;
pub mod seed_data;
pub mod services;
