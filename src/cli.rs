//! Command-line interface implementation for kickoff.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for kickoff.
#[derive(Parser, Debug)]
#[command(author, version, about = "kickoff: scaffold a LoopBack server with an optional React or Angular client", long_about = None)]
pub struct Args {
    /// Directory where the generated project will be created
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Directory containing the project templates [default: the templates built into kickoff]
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Read answers from a JSON or YAML file instead of prompting
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdin")]
    pub answers: Option<PathBuf>,

    /// Read answers as JSON from stdin instead of prompting
    #[arg(short, long)]
    pub stdin: bool,

    /// Force writing into an existing output directory
    #[arg(short, long)]
    pub force: bool,

    /// Skip `yarn install` once the files are generated
    #[arg(long)]
    pub skip_install: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
