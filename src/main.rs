//! CLI entry point for photomosaic generation

use clap::Parser;
use photomosaic::io::cli::{Cli, FileProcessor};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();

    let config = ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .build();
    if let Err(e) = TermLogger::init(
        cli.log_level(),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Logging disabled: {e}");
    }

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
