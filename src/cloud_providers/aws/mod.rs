pub mod config;
pub mod cost_explorer;
pub mod ec2;
