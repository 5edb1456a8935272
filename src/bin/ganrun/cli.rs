use clap::{Parser, Subcommand};
use clap_complete::Shell;
use ganrun::core::params::{MultiFlag, RunParams, DEFAULT_GAN_TYPE};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ganrun",
    version = ganrun::version(),
    infer_long_args = true,
    args_override_self = true,
    about = "Runs GAN training through the Torch runtime."
)]
pub struct GanRun {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[arg(long, global = true, help = "Path to the config file")]
    pub config: Option<PathBuf>,

    /// Progressive-growing GAN
    #[arg(long = "type", value_name = "TYPE", default_value = DEFAULT_GAN_TYPE)]
    pub gan_type: String,

    /// true: if you want to prevent memory allocation across all GPUs
    #[arg(long, value_name = "VALUE")]
    pub multi: Option<String>,

    /// Print the command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl GanRun {
    pub fn params(&self) -> RunParams {
        RunParams {
            gan_type: self.gan_type.clone(),
            multi: MultiFlag::from(self.multi.clone()),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts
    Completion {
        /// The shell to generate the completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        GanRun::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = GanRun::try_parse_from(["ganrun"]).unwrap();
        assert_eq!(args.params(), RunParams::default());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_type_and_multi() {
        let args = GanRun::try_parse_from(["ganrun", "--type", "pggan", "--multi", "true"]).unwrap();
        let params = args.params();
        assert_eq!(params.gan_type, "pggan");
        assert_eq!(params.multi, MultiFlag::Value("true".to_string()));
        assert!(params.multi.is_set());
    }

    #[test]
    fn test_multi_requires_value() {
        assert!(GanRun::try_parse_from(["ganrun", "--multi"]).is_err());
    }

    #[test]
    fn test_long_flag_prefixes() {
        let args = GanRun::try_parse_from(["ganrun", "--ty", "dcgan", "--mul", "true"]).unwrap();
        assert_eq!(args.gan_type, "dcgan");
        assert_eq!(args.multi.as_deref(), Some("true"));
    }

    #[test]
    fn test_repeated_flags_last_wins() {
        let args = GanRun::try_parse_from([
            "ganrun", "--multi", "a", "--multi", "b", "--type", "x", "--type", "y",
        ])
        .unwrap();
        assert_eq!(args.params().multi, MultiFlag::Value("b".to_string()));
        assert_eq!(args.gan_type, "y");
    }

    #[test]
    fn test_empty_multi_is_unset() {
        let args = GanRun::try_parse_from(["ganrun", "--multi", ""]).unwrap();
        assert!(!args.params().multi.is_set());
    }

    #[test]
    fn test_completion_subcommand() {
        let args = GanRun::try_parse_from(["ganrun", "completion", "zsh"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Completion { shell: Shell::Zsh })
        ));
    }
}
