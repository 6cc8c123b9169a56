use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

mod check;
mod commands;
mod config;
mod regression;

/// Multi-module regression driver for HDL verification suites.
///
/// simreg enumerates the configured verification modules, stages each
/// module's simulation workspace, delegates execution to the module's own
/// runner script, and aggregates the failing-test counts the runners
/// encode in their exit statuses. simreg's own exit status is that
/// aggregate, so it composes as a runner for a higher-level driver.
///
/// EXAMPLES:
///     simreg run                   Run the whole regression suite
///     simreg run -- -gui           Forward arguments to every runner
///     simreg check bitvis_vip_sbi  Component check with status file
///     simreg clean uvvm_util       Prepare a workspace without running
///     simreg modules               Show the parsed module list
///
/// ENVIRONMENT VARIABLES:
///     SIMREG_OUTPUT       Set to 'json' for JSON output by default
///     SIMREG_MODULE_LIST  Override the module list path
///     NO_COLOR            Set to disable colored output
#[derive(Parser)]
#[command(name = "simreg")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full regression suite
    ///
    /// Iterates the module list in order. For each module the workspace is
    /// prepared (protected files kept, everything else removed), the
    /// module's runner is launched inside it, and its failing-test count
    /// is added to the running total printed before each module starts.
    ///
    /// EXAMPLES:
    ///     simreg run                      Run all modules
    ///     simreg run --json               Machine-readable summary
    ///     simreg run -- -simulator ghdl   Forward args to the runners
    #[command(visible_alias = "r")]
    Run {
        /// Arguments forwarded verbatim to every module runner (after `--`)
        #[arg(last = true)]
        runner_args: Vec<String>,
        /// Output the summary in JSON format
        #[arg(long, env = "SIMREG_JSON")]
        json: bool,
        /// Directory to resolve paths against (where simreg.toml lives)
        #[arg(long, short = 'C', default_value = ".")]
        dir: PathBuf,
        /// Path to the configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the module list path
        #[arg(long)]
        module_list: Option<PathBuf>,
        /// Disable colored output
        #[arg(long, env = "NO_COLOR")]
        no_color: bool,
    },

    /// Run one module's component check
    ///
    /// Executes the configured [[check.steps]] sequence for a single
    /// module, sweeping scratch paths between steps, and writes a
    /// PASS/FAIL transcript to the module's status file.
    ///
    /// EXAMPLES:
    ///     simreg check bitvis_vip_sbi     Check one component
    Check {
        /// The module to check
        module: String,
        /// Directory to resolve paths against (where simreg.toml lives)
        #[arg(long, short = 'C', default_value = ".")]
        dir: PathBuf,
        /// Path to the configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Disable colored output
        #[arg(long, env = "NO_COLOR")]
        no_color: bool,
    },

    /// Prepare module workspaces without running anything
    ///
    /// Creates each workspace if missing, otherwise removes everything
    /// but the protected files. Useful after an interrupted run.
    ///
    /// EXAMPLES:
    ///     simreg clean uvvm_util              One workspace
    ///     simreg clean uvvm_util bitvis_irqc  Several at once
    Clean {
        /// Modules whose workspaces should be prepared
        #[arg(required = true)]
        modules: Vec<String>,
        /// Directory to resolve paths against (where simreg.toml lives)
        #[arg(long, short = 'C', default_value = ".")]
        dir: PathBuf,
        /// Path to the configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Disable colored output
        #[arg(long, env = "NO_COLOR")]
        no_color: bool,
    },

    /// Print the parsed module list in run order
    ///
    /// Shows the list exactly as the orchestrator would consume it:
    /// comment lines dropped, names folded to lower-case.
    ///
    /// EXAMPLES:
    ///     simreg modules             Numbered list
    ///     simreg modules --json      JSON array of names
    #[command(visible_alias = "ls")]
    Modules {
        /// Output as a JSON array
        #[arg(long, env = "SIMREG_JSON")]
        json: bool,
        /// Directory to resolve paths against (where simreg.toml lives)
        #[arg(long, short = 'C', default_value = ".")]
        dir: PathBuf,
        /// Path to the configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the module list path
        #[arg(long)]
        module_list: Option<PathBuf>,
    },

    /// Generate shell completions
    ///
    /// Outputs shell completion scripts for bash, zsh, fish, or powershell.
    ///
    /// EXAMPLES:
    ///     simreg completions bash > ~/.bash_completions/simreg.bash
    ///     simreg completions zsh > ~/.zfunc/_simreg
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    if cli_config.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Run {
            runner_args,
            json,
            dir,
            config,
            module_list,
            no_color,
        } => {
            // Command-line flag overrides environment variable
            let use_json = json || cli_config.default_json;
            let args = commands::run::RunArgs {
                config,
                dir,
                module_list: module_list.or(cli_config.module_list),
                json: use_json,
                no_color: no_color || cli_config.no_color,
                forwarded: runner_args,
            };
            commands::run::run(args)?;
        }
        Commands::Check {
            module,
            dir,
            config,
            no_color,
        } => {
            let args = commands::check::CheckArgs {
                module,
                config,
                dir,
                no_color: no_color || cli_config.no_color,
            };
            commands::check::run(args)?;
        }
        Commands::Clean {
            modules,
            dir,
            config,
            no_color,
        } => {
            let args = commands::clean::CleanArgs {
                modules,
                config,
                dir,
                no_color: no_color || cli_config.no_color,
            };
            commands::clean::run(args)?;
        }
        Commands::Modules {
            json,
            dir,
            config,
            module_list,
        } => {
            let use_json = json || cli_config.default_json;
            let args = commands::modules::ModulesArgs {
                config,
                dir,
                module_list: module_list.or(cli_config.module_list),
                json: use_json,
            };
            commands::modules::run(args)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
