pub mod auth;
pub mod fields;
pub mod inventory;
pub mod lookups;
pub mod products;
pub mod sales;
pub mod summary;
