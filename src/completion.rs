use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

pub fn generate_to<W: Write>(shell: Shell, cmd: &mut Command, bin_name: &str, out: &mut W) {
    generate(shell, cmd, bin_name, out);
}

pub fn generate_to_stdout(shell: Shell, cmd: &mut Command, bin_name: &str) {
    generate_to(shell, cmd, bin_name, &mut std::io::stdout());
}
