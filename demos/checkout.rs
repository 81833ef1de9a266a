//! Checkout Example
//!
//! Prices a basket given as a string of item codes.
//!
//! Use `-c` to choose the catalog YAML file
//! Use `-r` to print an itemised receipt instead of the total
//! Use `--log-level debug` to watch the pricing stages

use std::io;

use anyhow::Result;
use clap::Parser;
use checkout_engine::{
    checkout::Checkout,
    config::{CheckoutArgs, LogFormat, LoggingConfig},
    fixtures::load_catalog,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    init_logging(&args.logging)?;

    let catalog = load_catalog(&args.catalog)?;
    let checkout = Checkout::new(&catalog);

    info!(catalog = %args.catalog.display(), items = catalog.len(), "catalog ready");

    if args.receipt {
        let receipt = checkout.receipt_skus(&args.skus)?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();

        receipt.write_to(&mut handle, &catalog)?;
    } else {
        println!("{}", checkout.total_skus(&args.skus)?);
    }

    Ok(())
}
