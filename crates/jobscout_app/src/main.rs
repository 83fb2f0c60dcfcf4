mod platform;

use clap::Parser;

use platform::config::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli)?;
    platform::logging::initialize(
        config.log,
        platform::logging::level_for_verbosity(cli.verbose),
        &config.log_file,
    );
    platform::run_app(config)
}
