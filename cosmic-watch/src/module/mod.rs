pub mod context;
pub mod handler;
pub mod health;
pub mod neo;
pub mod orbit;
pub mod scheduled;
