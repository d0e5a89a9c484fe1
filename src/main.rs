use anyhow::Context;
use clap::Parser;
use proxy_harvester::{
    console, logging, run, Config, CrawlerConfig, ProxyKind, ProxySource, Result,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;

/// Harvest free proxies from multiple public sources
#[derive(Parser, Debug)]
#[command(name = "proxy-harvester")]
#[command(version, about = "Harvest free proxies from multiple public sources")]
struct Cli {
    /// Proxy protocol type to harvest
    #[arg(short = 't', long = "type", value_enum, default_value_t = ProxyKind::Https)]
    proxy_kind: ProxyKind,

    /// Output file or directory path
    #[arg(short, long, default_value = "proxies.txt")]
    output: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Additional URLs to scrape (can specify multiple)
    #[arg(short, long)]
    url: Vec<String>,

    /// File containing additional URLs to scrape (one URL per line)
    #[arg(short = 'f', long)]
    url_file: Option<PathBuf>,

    /// Skip the built-in source list
    #[arg(long)]
    no_default_sources: bool,

    /// Timeout in seconds for each HTTP request
    #[arg(long, default_value = "15")]
    timeout: u64,

    /// Number of sources fetched concurrently
    #[arg(short, long, default_value = "4")]
    concurrency: usize,
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut sources = if cli.no_default_sources {
        Vec::new()
    } else {
        ProxySource::defaults()
    };
    sources.extend(cli.url.iter().map(|url| ProxySource::new(url)));
    if let Some(path) = &cli.url_file {
        let listed = ProxySource::load_list(path)
            .with_context(|| format!("cannot use URL file {}", path.display()))?;
        sources.extend(listed);
    }

    let crawler = CrawlerConfig::new()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_concurrency(cli.concurrency);

    Ok(Config {
        proxy_kind: cli.proxy_kind,
        output: cli.output.clone(),
        sources,
        crawler,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    console::print_banner();
    logging::init_logging(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            console::print_error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };
    if config.sources.is_empty() {
        console::print_error("No sources to scrape");
        return ExitCode::FAILURE;
    }

    match run(&config).await {
        Ok(summary) => {
            console::print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            console::print_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["proxy-harvester"]);
        assert_eq!(cli.proxy_kind, ProxyKind::Https);
        assert_eq!(cli.output, "proxies.txt");
        assert!(!cli.verbose);

        let config = build_config(&cli).unwrap();
        assert_eq!(config.sources, ProxySource::defaults());
        assert_eq!(config.crawler.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_cli_extra_urls() {
        let cli = Cli::parse_from([
            "proxy-harvester",
            "--type",
            "all",
            "--no-default-sources",
            "-u",
            "https://a.example/list.txt",
            "--url",
            "https://b.example/",
        ]);
        assert_eq!(cli.proxy_kind, ProxyKind::All);
        let config = build_config(&cli).unwrap();
        assert_eq!(
            config.sources,
            vec![
                ProxySource::new("https://a.example/list.txt"),
                ProxySource::new("https://b.example/"),
            ]
        );
    }

    #[test]
    fn test_cli_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["proxy-harvester", "--type", "socks5"]).is_err());
    }
}
