// ABOUTME: CLI binary for the companyscope company profile scraper.
// ABOUTME: Scrapes a URL list into JSON/CSV exports, or extracts one saved HTML page offline.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use companyscope::{init_logging, run, CompanyParser, Settings};

#[derive(Parser, Debug)]
#[command(name = "companyscope")]
#[command(about = "Scrape company profile pages into structured records")]
struct Args {
    /// File with one profile URL per line
    #[arg(short = 'i', long = "input", default_value = "data/input_urls.txt")]
    input: PathBuf,

    /// Settings file (default: config/settings.json, then config/settings.example.json)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// HTML file to extract offline (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// URL the HTML file was fetched from (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Output directory, overriding the settings file
    #[arg(long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Output format (json or csv); repeat for several
    #[arg(long = "format")]
    formats: Vec<String>,
}

fn extract_offline(html_path: &Path, url: &str) -> ExitCode {
    let bytes = match fs::read(html_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error reading file {:?}: {}", html_path, e);
            return ExitCode::from(1);
        }
    };

    let record = match CompanyParser::new().extract_bytes(&bytes, url) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("error parsing HTML: {}", e);
            return ExitCode::from(1);
        }
    };

    match serde_json::to_string_pretty(&record) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error serializing record: {}", e);
            ExitCode::from(1)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.html.is_some() && args.url.is_none() {
        eprintln!("error: --url is required when using --html");
        return ExitCode::from(1);
    }
    if args.url.is_some() && args.html.is_none() {
        eprintln!("error: --url is only used together with --html");
        return ExitCode::from(1);
    }

    if let (Some(html_path), Some(url)) = (&args.html, &args.url) {
        let level = Settings::load(args.config.as_deref())
            .map(|s| s.logging.level)
            .unwrap_or_else(|_| "INFO".to_string());
        init_logging(&level);
        return extract_offline(html_path, url);
    }

    let mut settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(1);
        }
    };
    init_logging(&settings.logging.level);

    if let Some(dir) = args.output_dir {
        settings.output.directory = dir;
    }
    if !args.formats.is_empty() {
        settings.output.format_names = args.formats;
    }

    match run(&settings, &args.input).await {
        Ok(summary) => {
            println!(
                "Scraped {} of {} URLs ({} failed)",
                summary.succeeded, summary.total, summary.failed
            );
            for file in &summary.files {
                println!("{}", file.display());
            }
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
