use casegen_core::responses::RenderedPrompt;
use casegen_llm::build_test_case_prompt;
use casegen_synth::split_requirements;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::commands::shared::input::read_input;
use crate::context::{AppContext, query_index};
use crate::output::output;

/// Handle `casegen prompt`: the exact prompts `generate` would send.
pub async fn handle(args: &InputArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_input(args)?;
    let requirements = split_requirements(&text);
    if requirements.is_empty() {
        return output(&Vec::<RenderedPrompt>::new(), flags.format);
    }

    let index = ctx.load_index().await?;
    let top_k = ctx.config.general.top_k;

    let mut prompts = Vec::with_capacity(requirements.len());
    for requirement in &requirements {
        let compliance_tags = if index.is_available() && top_k > 0 {
            query_index(&index, requirement.text(), top_k)
                .await?
                .into_iter()
                .map(|snippet| snippet.tag)
                .collect()
        } else {
            Vec::new()
        };
        prompts.push(RenderedPrompt {
            req_id: requirement.id().to_string(),
            prompt: build_test_case_prompt(requirement.text(), &compliance_tags),
            compliance_tags,
        });
    }

    output(&prompts, flags.format)
}
