pub mod cache;
pub mod export;
