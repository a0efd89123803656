// Manna - Scripture study assistant
// Library exports

pub mod cli;
pub mod config;
pub mod favorites;
pub mod providers;
pub mod wisdom;
