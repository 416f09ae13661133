///! Configuration commands

use crate::output::{self, OutputFormat};
use crate::ConfigCommands;
use anyhow::Result;
use cloudsim_core::SimConfig;

pub fn handle_config_command(
    command: ConfigCommands,
    config: &SimConfig,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Sample => {
            print!("{}", SimConfig::generate_sample());
        }
        ConfigCommands::Show => {
            output::print_single(config, output_format)?;
        }
    }

    Ok(())
}
