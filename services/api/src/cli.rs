use crate::demo::{
    run_catalog_summary, run_demo, run_document_requirements, run_document_validation,
    run_recommend, CatalogSummaryArgs, DemoArgs, DocumentRequirementsArgs, DocumentValidationArgs,
    RecommendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_wizard::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Business Loan Wizard",
    about = "Run the business loan wizard service or explore its lender logic from the command line",
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
    /// Filter the lender catalog for a funding profile
    Recommend(RecommendArgs),
    /// Resolve or validate application documents
    Documents {
        #[command(subcommand)]
        command: DocumentsCommand,
    },
    /// Inspect the lender catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Walk one applicant through recommendations, documents, and the upload gate
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DocumentsCommand {
    /// List the documents required for the selected product categories
    Requirements(DocumentRequirementsArgs),
    /// Check an uploads JSON file against the 3 + 3 financials rule
    Validate(DocumentValidationArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Summarize active products by country and product type
    Summary(CatalogSummaryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured lender catalog file (JSON or CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Documents {
            command: DocumentsCommand::Requirements(args),
        } => run_document_requirements(args),
        Command::Documents {
            command: DocumentsCommand::Validate(args),
        } => run_document_validation(args),
        Command::Catalog {
            command: CatalogCommand::Summary(args),
        } => run_catalog_summary(args),
        Command::Demo(args) => run_demo(args),
    }
}
