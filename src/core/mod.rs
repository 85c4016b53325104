pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod reconcile;
pub mod save;
pub mod serialize;
pub mod session;
