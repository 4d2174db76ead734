//! Shell completion command handler.

use clap::Command;
use clap_complete::Shell;

/// Completions command.
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, &mut std::io::stdout());
}
