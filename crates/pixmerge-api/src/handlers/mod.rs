pub mod combine;
pub mod health;
pub mod output;
