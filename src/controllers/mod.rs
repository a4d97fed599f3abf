pub mod cli;
pub mod interactive;
pub mod job;
pub mod ports;
pub mod stepping;
