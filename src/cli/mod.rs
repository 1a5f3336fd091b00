mod commands;

pub use commands::{Cli, ColorModeArg, Command, OutputFormat};
