pub mod cli;
pub mod env_check;
pub mod logging;
