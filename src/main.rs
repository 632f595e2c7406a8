//! kickoff's main application entry point.
//! Parses the command line, collects answers, runs the scaffolding pipeline
//! and finalizes the generated project.

use kickoff::{
    bundle::TemplateRoot,
    cli::{get_args, Args},
    commands::SystemCommandRunner,
    constants::SUCCESS_MESSAGE,
    error::{default_error_handler, Result},
    fetcher::GitCloner,
    logger::init_logger,
    parser::{get_answers, get_answers_from, AnswerSource},
    pipeline::PipelineRunner,
    postprocess::PostProcessor,
    processor::ensure_output_dir,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Stages the templates and checks the output directory
/// 2. Collects answers (stdin, answers file or prompts)
/// 3. Runs the scaffolding pipeline
/// 4. Finalizes the project; failures there are reported, not fatal
fn run(args: Args) -> Result<()> {
    let templates = TemplateRoot::resolve(args.templates)?;

    let output_root = ensure_output_dir(&args.output_dir, args.force)?;

    let source = AnswerSource::new(args.stdin, args.answers);
    let preloaded = get_answers_from(&source)?;
    let prompt = DialoguerPrompter::new();
    let answers = get_answers(&prompt, preloaded, source.is_interactive())?;

    let engine = MiniJinjaRenderer::new();
    let cloner = GitCloner::new();
    let commands = SystemCommandRunner::new();

    let mut runner =
        PipelineRunner::new(&engine, &cloner, &commands, templates.path(), &output_root)
            .install_dependencies(!args.skip_install);
    let report = runner.run(&answers)?;

    let finalization = PostProcessor::new(&commands, &output_root).finalize(&report);
    if finalization.is_clean() {
        println!("{SUCCESS_MESSAGE}");
    } else {
        println!(
            "Project generated in {} with {} finalization step(s) to rerun by hand.",
            output_root.display(),
            finalization.failures.len()
        );
    }
    Ok(())
}
