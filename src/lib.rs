pub mod cli;
pub mod config;
pub mod connect;
pub mod driver;
pub mod report;
pub mod util;
