mod commands;
mod event;
mod handler;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use obfuscator_engine::{BucketStores, LocalStores, S3Stores};
use obfuscator_types::config::{DESTINATION_BUCKET_ENV, PII_FIELDS_ENV};
use obfuscator_types::{parse_column_list, MaskConfig};

#[derive(Parser)]
#[command(
    name = "obfuscator",
    version,
    about = "Mask PII columns in CSV, JSON and Parquet objects"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one object-created event and write the masked object
    Handle {
        /// Path to the event JSON document, or `-` for stdin
        #[arg(long, default_value = "-")]
        event: PathBuf,
        /// Bucket that receives `obfuscated/<key>`
        #[arg(long, env = DESTINATION_BUCKET_ENV)]
        destination_bucket: String,
        /// Comma-separated column names to mask
        #[arg(long, env = PII_FIELDS_ENV, default_value = "")]
        pii_fields: String,
        /// Object store backend
        #[arg(long, value_enum, default_value_t = StoreKind::S3)]
        store: StoreKind,
        /// Root directory for the local backend; bucket `b` is `<root>/b`
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Mask columns in a local file
    Mask {
        /// Input file; the format comes from its extension
        input: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// Comma-separated column names to mask
        #[arg(long, env = PII_FIELDS_ENV, default_value = "")]
        columns: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreKind {
    /// Amazon S3, configured from the AWS environment
    S3,
    /// Local directories under `--root`
    Local,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Handle {
            event,
            destination_bucket,
            pii_fields,
            store,
            root,
        } => {
            let config = MaskConfig::new(destination_bucket, parse_column_list(&pii_fields))
                .context("Invalid masking configuration")?;
            let stores: Arc<dyn BucketStores> = match store {
                StoreKind::S3 => Arc::new(S3Stores),
                StoreKind::Local => Arc::new(LocalStores::new(root)),
            };
            commands::handle::execute(&event, config, stores).await
        }
        Commands::Mask {
            input,
            output,
            columns,
        } => commands::mask::execute(&input, &output, &parse_column_list(&columns)),
    }
}
