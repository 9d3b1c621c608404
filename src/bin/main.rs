//! YAML to X.509 template CLI
//!
//! Renders certificate templates from YAML configuration documents and
//! manages the converter configuration file.

use clap::{Parser, Subcommand, ValueEnum};
use miette::{Context, Result};
use std::path::{Path, PathBuf};
use yaml_x509::{
    read_document, render_spec, render_summary, ConfigManager, ConverterConfiguration,
    ConvertWorkflow, ExportFormat, FlagMergePolicy, OutputFormat, TemplateError,
};

#[derive(Parser)]
#[command(name = "yaml-x509")]
#[command(about = "Build X.509 certificate templates from YAML configuration documents")]
#[command(long_about = "
yaml-x509 - Certificate template builder

EXAMPLES:
    # Render the template described by a document
    yaml-x509 render server.yaml

    # Render as YAML, reading the document from stdin
    cat server.yaml | yaml-x509 render - --format yaml

    # Show the merged specification before templating
    yaml-x509 resolve server.yaml

    # Only let segments that set CA flags override them
    yaml-x509 config set flag_merge when_present

DOCUMENT SHAPES:
    segments/merge  Named segments merged in order, then `config` on top
    config          A single specification under the `config` key
    flat            The whole document is the specification

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the certificate template and print its summary
    Render {
        /// Configuration document, `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormatArg>,

        /// CA flag merge policy (overrides config)
        #[arg(long, value_enum)]
        flag_merge: Option<FlagMergeArg>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the resolved specification as YAML
    Resolve {
        /// Configuration document, `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// CA flag merge policy (overrides config)
        #[arg(long, value_enum)]
        flag_merge: Option<FlagMergeArg>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Create default configuration file
    Init,

    /// Set a configuration value
    Set {
        /// Configuration key (flag_merge, output_format, verbose)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Export configuration
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ExportFormatArg,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import configuration
    Import {
        /// Configuration file to import
        file: PathBuf,
        /// Import format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ExportFormatArg,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormatArg {
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum FlagMergeArg {
    AlwaysOverwrite,
    WhenPresent,
}

impl From<FlagMergeArg> for FlagMergePolicy {
    fn from(arg: FlagMergeArg) -> Self {
        match arg {
            FlagMergeArg::AlwaysOverwrite => FlagMergePolicy::AlwaysOverwrite,
            FlagMergeArg::WhenPresent => FlagMergePolicy::WhenPresent,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum ExportFormatArg {
    Toml,
    Json,
    Yaml,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Toml => ExportFormat::Toml,
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Yaml => ExportFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            format,
            flag_merge,
            verbose,
        } => handle_render_command(&file, format, flag_merge, verbose)?,

        Commands::Resolve { file, flag_merge } => handle_resolve_command(&file, flag_merge)?,

        Commands::Config(config_cmd) => handle_config_command(config_cmd)?,
    }

    Ok(())
}

/// Stored configuration, or defaults when no file exists yet
fn load_configuration() -> Result<ConverterConfiguration> {
    let manager = ConfigManager::new()?;
    if manager.config_path().exists() {
        Ok(manager.load()?)
    } else {
        log::debug!("No configuration file, using defaults");
        Ok(ConverterConfiguration::default())
    }
}

fn workflow_for(config: &ConverterConfiguration, flag_merge: Option<FlagMergeArg>) -> ConvertWorkflow {
    match flag_merge {
        Some(policy) => ConvertWorkflow::new(policy.into()),
        None => ConvertWorkflow::from_configuration(config),
    }
}

fn handle_render_command(
    file: &Path,
    format: Option<OutputFormatArg>,
    flag_merge: Option<FlagMergeArg>,
    verbose: bool,
) -> Result<()> {
    let config = load_configuration()?;
    let data = read_document(file)?;
    let template = workflow_for(&config, flag_merge).run(&data)?;

    if verbose || config.verbose {
        let extensions = template
            .extensions()
            .map_err(TemplateError::from)
            .wrap_err("Failed to encode extensions")?;
        eprintln!("Encoded {} extension(s):", extensions.len());
        for extension in &extensions {
            let critical = if extension.critical { " (critical)" } else { "" };
            eprintln!("  {}{critical}", extension.extn_id);
        }
    }

    let output_format = format.map_or(config.output_format, OutputFormat::from);
    let rendered = render_summary(&template, output_format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn handle_resolve_command(file: &Path, flag_merge: Option<FlagMergeArg>) -> Result<()> {
    let config = load_configuration()?;
    let data = read_document(file)?;
    let spec = workflow_for(&config, flag_merge).resolve(&data)?;
    let rendered = render_spec(&spec)?;
    print!("{rendered}");
    Ok(())
}

fn handle_config_command(config_cmd: ConfigCommands) -> Result<()> {
    let config_manager = ConfigManager::new()?;

    match config_cmd {
        ConfigCommands::Show => {
            if !config_manager.config_path().exists() {
                println!("No configuration file found. Use 'config init' to create one.");
                return Ok(());
            }
            let config = config_manager.load()?;
            println!("Current Configuration:");
            println!("  Flag merge policy: {}", config.flag_merge.as_str());
            println!("  Output format: {}", config.output_format.as_str());
            println!("  Verbose: {}", config.verbose);
            println!(
                "  Configuration file: {}",
                config_manager.config_path().display()
            );
        }

        ConfigCommands::Init => {
            config_manager.load_or_create_default()?;
            println!(
                "Configuration initialized: {}",
                config_manager.config_path().display()
            );
        }

        ConfigCommands::Set { key, value } => {
            config_manager.update_value(&key, &value)?;
            println!("Configuration updated: {key} = {value}");
        }

        ConfigCommands::Export { format, output } => {
            let content = config_manager.export_config(format.into())?;

            if let Some(output_path) = output {
                std::fs::write(&output_path, content)
                    .map_err(TemplateError::from)
                    .wrap_err_with(|| format!("Failed to write {}", output_path.display()))?;
                println!("Configuration exported to: {}", output_path.display());
            } else {
                println!("{content}");
            }
        }

        ConfigCommands::Import { file, format } => {
            let content = std::fs::read_to_string(&file)
                .map_err(TemplateError::from)
                .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
            config_manager.import_config(&content, format.into())?;
            println!("Configuration imported from: {}", file.display());
        }
    }

    Ok(())
}
