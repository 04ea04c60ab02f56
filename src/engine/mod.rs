pub mod arena;
pub mod models;
pub mod rules;
pub mod simulator;
pub mod strategy;
