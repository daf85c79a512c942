pub mod args;
pub mod commands;

pub use args::{AksArgs, GenerateArgs, ListArgs, PromptArgs, ScaffoldArgs, ScaffoldTarget};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "blueprint")]
#[command(version = crate::VERSION)]
#[command(about = "Compose CI/CD pipeline templates with security and compliance add-ons")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: list the catalog, generate a pipeline with add-ons, then keep the printed state query to regenerate it later."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Compose a pipeline document",
        long_about = "Generate picks the base template for the runner/workload/practice selection, merges the requested add-ons in order and writes the document to stdout or a file.",
        after_help = "Example:\n    blueprint generate --runner actions --workload container --addon sast --addon sbom --archive"
    )]
    Generate(GenerateArgs),
    #[command(
        about = "Show templates and add-ons",
        after_help = "Example:\n    blueprint list"
    )]
    List(ListArgs),
    #[command(
        about = "Extract cluster parameters from free text",
        long_about = "Prompt applies keyword heuristics to a request and prints the recognised cloud, compliance, region, private flag and node pool count as JSON.",
        after_help = "Example:\n    blueprint prompt \"private AKS in usgovvirginia with 3 nodepools\""
    )]
    Prompt(PromptArgs),
    #[command(
        about = "Write infrastructure scaffolding",
        after_help = "Example:\n    blueprint scaffold aks --name demo --env dev --region eastus --private --out ./infra-demo"
    )]
    Scaffold(ScaffoldArgs),
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Generate(generate_args) => commands::generate(generate_args),
        Command::List(list_args) => commands::list(list_args),
        Command::Prompt(prompt_args) => commands::prompt(prompt_args),
        Command::Scaffold(scaffold_args) => commands::scaffold(scaffold_args),
    }
}
