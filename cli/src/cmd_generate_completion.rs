// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs::File, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueEnum, ValueHint, arg, value_parser};
use clap_complete::generate;

use crate::Cli;

#[derive(Debug, Clone)]
pub struct CmdGenerateCompletion {
    /// Detected from `$SHELL` when absent.
    pub shell: Option<Shell>,
    pub output: Option<PathBuf>,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Generate shell completion for baatasari")
            .hide(true)
            .arg(
                arg!(shell: [SHELL] "The shell generator to use, detected from $SHELL if omitted")
                    .value_parser(value_parser!(Shell)),
            )
            .arg(
                arg!(-o --output <FILE> "Write the script to a file instead of stdout")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            shell: matches.get_one::<Shell>("shell").copied(),
            output: matches.get_one::<PathBuf>("output").cloned(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        let shell = match self.shell {
            Some(shell) => shell,
            None => Shell::detect().ok_or("Cannot detect the shell, pass one explicitly")?,
        };

        match &self.output {
            Some(path) => {
                let mut file = File::create(path)?;
                shell.generate(&mut file);
                tracing::info!(path = %path.display(), ?shell, "completion script written");
            }
            None => shell.generate(&mut io::stdout()),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    fn detect() -> Option<Self> {
        use clap_complete::Shell as ClapShell;

        match ClapShell::from_env()? {
            ClapShell::Bash => Some(Shell::Bash),
            ClapShell::Elvish => Some(Shell::Elvish),
            ClapShell::Fish => Some(Shell::Fish),
            ClapShell::PowerShell => Some(Shell::PowerShell),
            ClapShell::Zsh => Some(Shell::Zsh),
            _ => None,
        }
    }

    pub fn generate(self, buf: &mut impl io::Write) {
        use clap_complete::Shell as ClapShell;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        match self {
            Shell::Bash => generate(ClapShell::Bash, &mut cmd, name, buf),
            Shell::Elvish => generate(ClapShell::Elvish, &mut cmd, name, buf),
            Shell::Fish => generate(ClapShell::Fish, &mut cmd, name, buf),
            Shell::PowerShell => generate(ClapShell::PowerShell, &mut cmd, name, buf),
            Shell::Zsh => generate(ClapShell::Zsh, &mut cmd, name, buf),
            Shell::Nushell => generate(clap_complete_nushell::Nushell {}, &mut cmd, name, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CmdGenerateCompletion {
        let matches = Cli::command().try_get_matches_from(args).unwrap();
        let sub_matches = matches.subcommand_matches(CmdGenerateCompletion::NAME).unwrap();
        CmdGenerateCompletion::from(sub_matches)
    }

    #[test]
    fn test_parse_generate_completion() {
        let parsed = parse(&["baatasari", "generate-completion", "bash"]);
        assert_eq!(parsed.shell, Some(Shell::Bash));
        assert_eq!(parsed.output, None);

        let mut output = vec![];
        Shell::Bash.generate(&mut output);
        let script = String::from_utf8(output).unwrap();
        assert!(script.contains("baatasari"));
        assert!(script.contains("create-event"));
    }

    #[test]
    fn test_parse_shell_variants() {
        for (arg, shell) in [
            ("bash", Shell::Bash),
            ("elvish", Shell::Elvish),
            ("fish", Shell::Fish),
            ("nushell", Shell::Nushell),
            ("powershell", Shell::PowerShell),
            ("zsh", Shell::Zsh),
        ] {
            let parsed = parse(&["baatasari", "generate-completion", arg]);
            assert_eq!(parsed.shell, Some(shell), "shell {arg}");
        }
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("baatasari.fish");
        let path_str = path.to_str().unwrap();
        let parsed = parse(&["baatasari", "generate-completion", "fish", "-o", path_str]);
        assert_eq!(parsed.output.as_deref(), Some(path.as_path()));

        parsed.run().unwrap();
        let script = std::fs::read_to_string(&path).unwrap();
        assert!(script.contains("baatasari"));
    }
}
