use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::output::{write_records, OutputFormat};
use crate::process::Scraper;
use crate::request::HttpFetcher;
use crate::{RetrievalConfig, Result, DEFAULT_LIMIT, DEFAULT_TIMEOUT_SECS, START_PAGE};

#[derive(Debug, Parser)]
#[command(name = "eksisozluk-cli", version, about = "Lists entries and topics from eksisozluk")]
pub struct Cli {
    /// Request timeout in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists the entries of the topic a search resolves to.
    Entry {
        /// Search text, usually the topic title.
        text: String,
        #[command(flatten)]
        paging: Paging,
        /// Orders the entries by the site's "sukela" (most liked) mode.
        #[arg(long)]
        sukela: bool,
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },
    /// Lists the popular topics.
    Gundem {
        #[command(flatten)]
        paging: Paging,
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },
    /// Lists today's top entries.
    Debe {
        /// Maximum number of entries.
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct Paging {
    /// Page to start from.
    #[arg(long, default_value_t = START_PAGE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,
    /// Maximum number of records.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

impl Paging {
    fn config(self, sukela: bool) -> RetrievalConfig {
        RetrievalConfig {
            page_number: self.page as usize,
            limit: self.limit,
            sukela,
        }
    }
}

/// Runs the parsed command against the live site and writes its output.
pub async fn run(cli: Cli) -> Result<()> {
    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout))?;
    let scraper = Scraper::new(fetcher)?;

    match cli.command {
        Command::Entry {
            text,
            paging,
            sukela,
            output,
        } => {
            let entries = scraper.get_entries(&text, paging.config(sukela)).await?;
            write_records(&entries, output, "entries").await
        }
        Command::Gundem { paging, output } => {
            let topics = scraper.get_popular_topics(paging.config(false)).await?;
            write_records(&topics, output, "gundem").await
        }
        Command::Debe { limit, output } => {
            let config = RetrievalConfig {
                limit,
                ..Default::default()
            };
            let debe = scraper.get_debe(config).await?;
            write_records(&debe, output, "debe").await
        }
    }
}
