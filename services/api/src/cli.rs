use crate::commands::{
    run_catalog_list, run_catalog_show, run_consult, CatalogListArgs, CatalogShowArgs,
    ConsultArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use medisym::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "MediSym",
    about = "Suggest candidate diseases from a French free-text symptom description",
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
    /// Rank candidate diseases for a symptom description
    Consult(ConsultArgs),
    /// Browse the disease knowledge base
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List every disease in catalog order
    List(CatalogListArgs),
    /// Show the full profile of one disease
    Show(CatalogShowArgs),
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
        Command::Consult(args) => run_consult(args),
        Command::Catalog {
            command: CatalogCommand::List(args),
        } => run_catalog_list(args),
        Command::Catalog {
            command: CatalogCommand::Show(args),
        } => run_catalog_show(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["medisym-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_consult_arguments() {
        let cli = Cli::try_parse_from([
            "medisym-api",
            "consult",
            "fièvre et frissons",
            "--top-n",
            "5",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Consult(args)) => {
                assert_eq!(args.symptoms, "fièvre et frissons");
                assert_eq!(args.top_n, Some(5));
                assert!(args.json);
            }
            other => panic!("expected consult command, got {other:?}"),
        }
    }

    #[test]
    fn parses_catalog_show() {
        let cli = Cli::try_parse_from(["medisym-api", "catalog", "show", "7"]).expect("parses");
        match cli.command {
            Some(Command::Catalog {
                command: CatalogCommand::Show(args),
            }) => assert_eq!(args.id, 7),
            other => panic!("expected catalog show, got {other:?}"),
        }
    }
}
