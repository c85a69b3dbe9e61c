use crate::demo::{run_demo, run_tables_check, run_value, DemoArgs, TablesCheckArgs, ValueArgs};
use crate::server;
use autovalue::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Vehicle Valuation Service",
    about = "Estimate vehicle value and weigh repair against replacement",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Appraise a single vehicle and optional repair quote
    Value(ValueArgs),
    /// Inspect the valuation reference tables
    Tables {
        #[command(subcommand)]
        command: TablesCommand,
    },
    /// Walk through the reference scenarios with the bundled tables
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum TablesCommand {
    /// Load and validate reference tables, then print a summary
    Check(TablesCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Value(args) => run_value(args),
        Command::Tables {
            command: TablesCommand::Check(args),
        } => run_tables_check(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["autovalue-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_value_command_with_repair_range() {
        let cli = Cli::try_parse_from([
            "autovalue-api",
            "value",
            "--year",
            "2020",
            "--make",
            "Toyota",
            "--model",
            "Camry",
            "--mileage",
            "45000",
            "--repair-low",
            "900",
            "--repair-high",
            "1300",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Value(args)) => {
                assert_eq!(args.year, 2020);
                assert_eq!(args.repair_low, Some(900.0));
                assert_eq!(args.repair_high, Some(1300.0));
                assert!(args.repair_cost.is_none());
            }
            other => panic!("expected value command, got {other:?}"),
        }
    }

    #[test]
    fn repair_cost_conflicts_with_range() {
        let result = Cli::try_parse_from([
            "autovalue-api",
            "value",
            "--year",
            "2020",
            "--make",
            "Toyota",
            "--model",
            "Camry",
            "--mileage",
            "45000",
            "--repair-cost",
            "1000",
            "--repair-low",
            "900",
            "--repair-high",
            "1300",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_tables_check() {
        let cli = Cli::try_parse_from(["autovalue-api", "tables", "check", "--path", "t.json"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Tables {
                command: TablesCommand::Check(_)
            })
        ));
    }
}
