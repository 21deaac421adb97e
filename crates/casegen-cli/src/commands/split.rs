use casegen_core::responses::SplitResponse;
use casegen_synth::segment;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::commands::shared::input::read_input;
use crate::output::output;

/// Handle `casegen split`. Pure text processing, no index or model.
pub fn handle(args: &InputArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_input(args)?;
    let segmentation = segment(&text);

    let response = SplitResponse {
        strategy: segmentation
            .strategy
            .map_or_else(|| String::from("none"), |strategy| strategy.to_string()),
        requirements: segmentation.requirements,
    };
    output(&response, flags.format)
}
