use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::{info_time, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable records on stdout.
    #[default]
    Console,
    /// Pretty printed JSON file in the working directory.
    Json,
}

/// Writes the records in the requested format. JSON goes to `<name>.json`.
pub async fn write_records<T>(records: &[T], format: OutputFormat, name: &str) -> Result<()>
where
    T: Serialize + Display,
{
    match format {
        OutputFormat::Console => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(render_console(records).as_bytes()).await?;
            stdout.flush().await?;
        }
        OutputFormat::Json => {
            let path = PathBuf::from(format!("{name}.json"));
            write_json(records, &path).await?;
        }
    }
    Ok(())
}

pub async fn write_json<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let local_now = Local::now();
    let json = serde_json::to_vec_pretty(records)?;
    let mut file = File::create(path).await?;
    file.write_all(&json).await?;
    file.flush().await?;
    info_time!(local_now, "Wrote {} records to file: {}", records.len(), path.display());
    Ok(())
}

/// One record per block, blocks separated by an empty line.
pub fn render_console<T: Display>(records: &[T]) -> String {
    records
        .iter()
        .map(|r| format!("{r}\n"))
        .collect::<Vec<_>>()
        .join("\n")
}
