pub mod cli;
pub mod cmds;
pub mod engine;
pub mod logging;
pub mod main_shared;
pub mod registry;
pub mod report;
pub mod runner;
pub mod sweep;
pub mod synth;
pub mod types;
