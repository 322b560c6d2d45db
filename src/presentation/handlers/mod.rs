pub mod health;
pub mod user_handler;
