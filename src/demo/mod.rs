pub mod interactive;
pub mod synthetic;
