// pydantic-gen/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pydantic-gen")]
#[command(about = "Generates Pydantic BaseModel classes from INI, JSON and YAML files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Generator configuration (default: ./pydantic-gen.yaml if present)
    #[arg(long, global = true, env = "PYDANTIC_GEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// More logs on stderr (-v info, -vv debug)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🏗️  Generates the Python module of a file, or of every file in a directory
    Generate {
        /// Configuration file or directory
        input: PathBuf,

        /// Output file (file input) or directory (directory input)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Import configuration_file_to_dict from this module (ex: "my_pkg.config")
        #[arg(long)]
        runtime_import: Option<String>,

        /// Use the values of the file as field defaults
        #[arg(long, default_value = "false")]
        with_defaults: bool,

        /// Do not create __init__.py in new output directories
        #[arg(long, default_value = "false")]
        no_init: bool,

        /// Print the module instead of writing it (file input only)
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// 🔁 Converts a configuration file to the format of the output extension
    Convert {
        /// Source file (.ini, .json, .yaml, .yml)
        input: PathBuf,

        /// Destination file (.ini, .json, .yaml, .yml)
        output: PathBuf,
    },

    /// 🔍 Shows the classes that would be generated for a file
    Inspect {
        /// Configuration file
        input: PathBuf,

        /// Output format: table | json
        #[arg(long, value_enum, default_value_t = InspectFormat::Table)]
        format: InspectFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_generate_defaults() -> Result<()> {
        let args = Cli::try_parse_from(["pydantic-gen", "generate", "config.yaml"])?;
        assert_eq!(args.verbose, 0);
        match args.command {
            Commands::Generate {
                input,
                output,
                runtime_import,
                with_defaults,
                no_init,
                stdout,
            } => {
                assert_eq!(input, PathBuf::from("config.yaml"));
                assert_eq!(output, None);
                assert_eq!(runtime_import, None);
                assert!(!with_defaults && !no_init && !stdout);
                Ok(())
            }
            _ => bail!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parse_generate_flags() -> Result<()> {
        let args = Cli::try_parse_from([
            "pydantic-gen",
            "-vv",
            "generate",
            "configs",
            "-o",
            "models",
            "--runtime-import",
            "shared.config",
            "--with-defaults",
            "--no-init",
        ])?;
        assert_eq!(args.verbose, 2);
        match args.command {
            Commands::Generate {
                output,
                runtime_import,
                with_defaults,
                no_init,
                ..
            } => {
                assert_eq!(output, Some(PathBuf::from("models")));
                assert_eq!(runtime_import.as_deref(), Some("shared.config"));
                assert!(with_defaults && no_init);
                Ok(())
            }
            _ => bail!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_stdout_conflicts_with_output() {
        let result = Cli::try_parse_from(["pydantic-gen", "generate", "a.yaml", "-o", "a.py", "--stdout"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::try_parse_from(["pydantic-gen", "inspect", "a.ini", "--format", "json"])?;
        match args.command {
            Commands::Inspect { input, format } => {
                assert_eq!(input, PathBuf::from("a.ini"));
                assert_eq!(format, InspectFormat::Json);
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_convert() -> Result<()> {
        let args = Cli::try_parse_from(["pydantic-gen", "convert", "a.ini", "b.yaml", "--config", "x.yaml"])?;
        assert_eq!(args.config, Some(PathBuf::from("x.yaml")));
        match args.command {
            Commands::Convert { input, output } => {
                assert_eq!(input, PathBuf::from("a.ini"));
                assert_eq!(output, PathBuf::from("b.yaml"));
                Ok(())
            }
            _ => bail!("Expected Convert command"),
        }
    }
}
