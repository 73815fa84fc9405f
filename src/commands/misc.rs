use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

pub fn display_banner() {
    println!(
        r#"
 _____         _     _   _              _
|_   _|__  ___| |__ | \ | | ___ _ __ __| |
  | |/ _ \/ __| '_ \|  \| |/ _ \ '__/ _` |
  | |  __/ (__| | | | |\  |  __/ | | (_| |
  |_|\___|\___|_| |_|_| \_|\___|_|  \__,_|
"#
    );

    let mut cmd = crate::Cli::command();
    let _ = cmd.print_help();
    println!();
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "technerd", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  technerd completions bash > ~/.local/share/bash-completion/completions/technerd");
        }
        Shell::Zsh => {
            eprintln!("  technerd completions zsh > ~/.zsh/completions/_technerd");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  technerd completions fish > ~/.config/fish/completions/technerd.fish");
        }
        _ => {}
    }
}
