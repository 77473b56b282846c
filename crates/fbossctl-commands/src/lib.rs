pub mod command;
pub mod families;
