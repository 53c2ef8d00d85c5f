pub mod files;
pub mod generate;
pub mod health;
pub mod index;
