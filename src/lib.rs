pub mod config;
pub mod dial;
pub mod events;
pub mod gui;
pub mod sys;
