pub mod core;
pub mod gui;
pub mod persistence;
pub mod speech;
