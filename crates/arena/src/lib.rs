pub mod adjudicator;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod interpreter;
pub mod runner;
pub mod tally;
pub mod transcript;
