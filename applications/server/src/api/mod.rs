/// API route modules
pub mod games;
pub mod health;
