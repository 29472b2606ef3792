//! Registry CLI
//!
//! Runs a single registry operation and prints the result as pretty JSON.
//!
//! Usage:
//!   cargo run --features cli --bin registry_cli -- verify 01234567
//!   cargo run --features cli --bin registry_cli -- aggregate "SW1A 1AA" --limit 50
//!   cargo run --features cli --bin registry_cli -- --timeout-secs 10 company 01234567
//!
//! Credentials come from the environment (a `.env` file is honoured):
//!   COMPANIES_HOUSE_API_KEY, LAND_REGISTRY_API_KEY
//!
//! Set `RUST_LOG=registry_verification=debug` for request-level logging.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use registry_verification::company_registry::{DEFAULT_FILING_PAGE_SIZE, DEFAULT_SEARCH_PAGE_SIZE};
use registry_verification::property_registry::{DEFAULT_ADDRESS_LIMIT, DEFAULT_POSTCODE_LIMIT};
use registry_verification::{
    CompanyRegistryClient, ComplianceVerifier, PriceAggregator, PropertyRegistryClient,
    RegistrySettings,
};

/// Query the UK company and land registries
#[derive(Parser, Debug)]
#[command(name = "registry_cli")]
#[command(about = "Query the UK company and land registries")]
struct Args {
    /// Overall deadline for `verify` and `aggregate`, in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search companies by name
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_PAGE_SIZE)]
        page_size: usize,
    },
    /// Company profile
    Company { company_number: String },
    /// Company officers
    Officers { company_number: String },
    /// Filing history, most recent first
    Filings {
        company_number: String,
        #[arg(long, default_value_t = DEFAULT_FILING_PAGE_SIZE)]
        page_size: usize,
    },
    /// Persons with significant control
    Psc { company_number: String },
    /// Title register entry
    Title { title_number: String },
    /// Sales in a postcode
    Prices {
        postcode: String,
        #[arg(long, default_value_t = DEFAULT_POSTCODE_LIMIT)]
        limit: usize,
    },
    /// Sales matching a street fragment
    PricesByAddress {
        address: String,
        #[arg(long, default_value_t = DEFAULT_ADDRESS_LIMIT)]
        limit: usize,
    },
    /// Ownership history for a title
    Ownership { title_number: String },
    /// Compliance verdict for a company
    Verify { company_number: String },
    /// Price statistics for a postcode
    Aggregate {
        postcode: String,
        #[arg(long, default_value_t = DEFAULT_POSTCODE_LIMIT)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = RegistrySettings::from_env()?;
    let deadline = args.timeout_secs.map(Duration::from_secs);

    let companies = || {
        CompanyRegistryClient::new(&settings.company).context("building company registry client")
    };
    let land = || {
        PropertyRegistryClient::new(&settings.property).context("building land registry client")
    };

    match args.command {
        Command::Search { query, page_size } => {
            print(&companies()?.search_companies(&query, page_size).await?)
        }
        Command::Company { company_number } => {
            print(&companies()?.fetch_company(&company_number).await?)
        }
        Command::Officers { company_number } => {
            print(&companies()?.fetch_officers(&company_number).await?)
        }
        Command::Filings {
            company_number,
            page_size,
        } => print(
            &companies()?
                .fetch_filing_history(&company_number, page_size)
                .await?,
        ),
        Command::Psc { company_number } => {
            print(&companies()?.fetch_controlling_persons(&company_number).await?)
        }
        Command::Title { title_number } => {
            print(&land()?.fetch_title_record(&title_number).await?)
        }
        Command::Prices { postcode, limit } => {
            print(&land()?.fetch_prices_by_postcode(&postcode, limit).await?)
        }
        Command::PricesByAddress { address, limit } => {
            print(&land()?.fetch_prices_by_address(&address, limit).await?)
        }
        Command::Ownership { title_number } => {
            print(&land()?.fetch_ownership_history(&title_number).await?)
        }
        Command::Verify { company_number } => {
            let mut verifier = ComplianceVerifier::new(companies()?);
            if let Some(deadline) = deadline {
                verifier = verifier.with_deadline(deadline);
            }
            print(&verifier.verify(&company_number).await?)
        }
        Command::Aggregate { postcode, limit } => {
            let mut aggregator = PriceAggregator::new(land()?).with_limit(limit);
            if let Some(deadline) = deadline {
                aggregator = aggregator.with_deadline(deadline);
            }
            print(&aggregator.aggregate(&postcode).await?)
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
