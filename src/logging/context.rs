use crate::cli::Command;
use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Output goes to files; the console is free for diagnostics.
    Interactive,
    /// The command writes its result to stdout, so logs must stay off it.
    Pipe,
    /// Console logging explicitly silenced.
    Quiet,
}

impl ExecutionContext {
    /// Returns `true` when console sinks should be disabled.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::Quiet)
    }
}

/// Derive the active execution context from a parsed CLI command plus overrides.
pub fn detect_context(command: &Command) -> ExecutionContext {
    if quiet_override_enabled() {
        return ExecutionContext::Quiet;
    }

    match command {
        Command::Generate(args) if args.output.is_none() => ExecutionContext::Pipe,
        Command::List(_) | Command::Prompt(_) => ExecutionContext::Pipe,
        Command::Generate(_) | Command::Scaffold(_) => ExecutionContext::Interactive,
    }
}

fn quiet_override_enabled() -> bool {
    env::var("BLUEPRINT_QUIET")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}
