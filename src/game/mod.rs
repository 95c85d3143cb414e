pub mod ai;
pub mod arena;
pub mod combat;
pub mod effects;
pub mod events;
pub mod fighter;
pub mod intent;
pub mod match_controller;
pub mod round;
pub mod types;
