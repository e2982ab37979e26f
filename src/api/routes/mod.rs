pub mod conferences;
pub mod health;
