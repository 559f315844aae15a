//! chem cli interface

use chem::patch::Action;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("patch").required(true)))]
#[command(group(ArgGroup::new("selection").required(true)))]
pub struct Cli {
    /// What to do with each environment
    #[arg(short = 'a', long = "action", value_enum, default_value_t)]
    pub action: Action,

    /// Process every environment of a group from the config file
    #[arg(short = 'g', long = "environment-group", group = "selection")]
    pub environment_group: Option<String>,

    /// Process a single environment
    ///
    /// Can be specified multiple times.
    #[arg(short = 'e', long = "environment", group = "selection")]
    pub environments: Vec<String>,

    /// Skip environments whose name contains this text
    #[arg(long = "environment-exclude")]
    pub environment_exclude: Option<String>,

    /// Config file defining environment groups
    #[arg(short = 'c', long = "spork-config-file", env = "CHEM_SPORK_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Directory containing the environment files
    #[arg(long = "env-path", env = "CHEM_ENV_PATH", default_value = ".")]
    pub env_path: PathBuf,

    #[clap(flatten)]
    pub patch: PatchArgs,
}

#[derive(Parser, Debug)]
pub struct PatchArgs {
    /// Dot tree representation, e.g. default_attributes.client.ldap_server:ldap2
    ///
    /// Use `\.` for a dot inside a key and `[]` for a list.
    #[arg(long = "attribute", visible_alias = "atr", group = "patch")]
    pub attribute: Option<String>,

    /// Write a json patch using the editor from the EDITOR environment variable
    #[arg(short = 'm', long = "patch-interactive", group = "patch")]
    pub interactive: bool,

    /// Merge a file which contains a json object
    #[arg(short = 'p', long = "patch-from-file", group = "patch")]
    pub file: Option<PathBuf>,
}

impl std::fmt::Display for PatchArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.attribute, &self.file) {
            (Some(attribute), _) => write!(f, "attribute `{attribute}`"),
            (_, Some(file)) => write!(f, "patch file {}", file.display()),
            _ => f.write_str("interactive patch"),
        }
    }
}
