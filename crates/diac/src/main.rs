//! diac - Entry Point
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `diac compile` | Compile every snapshot binding that has no unit yet |
//! | `diac list` | List the unit tokens in the cache |
//! | `diac show <interface> [--name <name>]` | Print one unit as code |
//! | `diac snapshot` | Summarize the module snapshot |

use clap::Parser;
use diac::cli::{Cli, run};
use diac::infrastructure::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging)?;
    run(&cli, config, &mut std::io::stdout().lock())
}
