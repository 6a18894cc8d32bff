// Command modules for the token-launch CLI

pub mod create;
pub mod derive;
pub mod utils;
