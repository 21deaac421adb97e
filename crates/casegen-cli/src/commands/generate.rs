use casegen_core::responses::TestCaseResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::commands::shared::input::read_input;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `casegen generate`.
pub async fn handle(args: &GenerateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;
    let synthesizer = ctx.synthesizer(args.concurrency).await?;

    let progress = Progress::spinner("Generating test cases");
    let (test_cases, requirements) = synthesizer.generate_test_cases(&text).await;
    progress.finish_ok(&format!(
        "Generated {} test cases for {} requirements",
        test_cases.len(),
        requirements.len()
    ));

    output(&TestCaseResponse::new(test_cases, requirements), flags.format)
}
