pub mod cover;
pub mod generation;
pub mod health;
pub mod task;
