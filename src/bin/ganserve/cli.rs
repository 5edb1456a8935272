use clap::{Parser, Subcommand};
use clap_complete::Shell;
use ganrun::core::params::{ServeParams, DEFAULT_GAN_TYPE};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ganserve",
    version = ganrun::version(),
    infer_long_args = true,
    args_override_self = true,
    about = "Starts the GAN serving script through the Torch runtime."
)]
pub struct GanServe {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[arg(long, global = true, help = "Path to the config file")]
    pub config: Option<PathBuf>,

    /// Progressive-growing GAN
    #[arg(long = "type", value_name = "TYPE", default_value = DEFAULT_GAN_TYPE)]
    pub gan_type: String,

    /// Print the command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl GanServe {
    pub fn params(&self) -> ServeParams {
        ServeParams {
            gan_type: self.gan_type.clone(),
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
        GanServe::command().debug_assert();
    }

    #[test]
    fn test_default_type() {
        let args = GanServe::try_parse_from(["ganserve"]).unwrap();
        assert_eq!(args.params(), ServeParams::default());
    }

    #[test]
    fn test_custom_type() {
        let args = GanServe::try_parse_from(["ganserve", "--type", "resnet"]).unwrap();
        assert_eq!(args.params().gan_type, "resnet");
        assert_eq!(args.params().kind(), None);
    }

    #[test]
    fn test_type_prefix_and_repeat() {
        let args =
            GanServe::try_parse_from(["ganserve", "--ty", "resnet", "--type", "pggan"]).unwrap();
        assert_eq!(args.params().kind(), Some(ganrun::core::params::GanKind::Pggan));
    }

    #[test]
    fn test_multi_is_not_accepted() {
        assert!(GanServe::try_parse_from(["ganserve", "--multi", "true"]).is_err());
    }
}
