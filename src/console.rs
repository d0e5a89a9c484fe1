//! Colored terminal output for the command-line front end

use crate::harvest::HarvestSummary;
use crossterm::style::Stylize;

const LOGO: &str = r#"
 ____                           _   _                           _
|  _ \ _ __ _____  ___   _     | | | | __ _ _ ____   _____  ___| |_ ___ _ __
| |_) | '__/ _ \ \/ / | | |    | |_| |/ _` | '__\ \ / / _ \/ __| __/ _ \ '__|
|  __/| | | (_) >  <| |_| |    |  _  | (_| | |   \ V /  __/\__ \ ||  __/ |
|_|   |_|  \___/_/\_\\__, |    |_| |_|\__,_|_|    \_/ \___||___/\__\___|_|
                     |___/
"#;

/// Banner text with the crate version
pub fn banner() -> String {
    format!("{}\nProxy Harvester v{}\n", LOGO, env!("CARGO_PKG_VERSION"))
}

pub fn print_banner() {
    println!("{}", banner().cyan().bold());
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("[ERROR] {}", message).red());
}

/// Print the per-run outcome followed by the summary block
pub fn print_summary(summary: &HarvestSummary) {
    if summary.valid == 0 {
        println!("{}", "[WARN] No valid proxies found to save".yellow());
    }
    println!(
        "{}",
        format!(
            "[OK] Saved {} new proxies to {}",
            summary.added,
            summary.output.display()
        )
        .green()
    );

    println!("\n{}", "[OK] Harvest complete!".green());
    for (label, value) in summary_lines(summary) {
        println!("{} {}", format!("• {}:", label).yellow(), value.cyan());
    }
}

fn summary_lines(summary: &HarvestSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Scraped proxies", summary.total_scraped.to_string()),
        ("Valid proxies", summary.valid.to_string()),
        ("Type", summary.proxy_kind.to_string().to_uppercase()),
        ("Output", summary.output.display().to_string()),
        ("New entries", summary.added.to_string()),
        ("Total in file", summary.total.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::ProxyKind;
    use std::path::PathBuf;

    #[test]
    fn test_banner_has_version() {
        assert!(banner().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_summary_lines() {
        let summary = HarvestSummary {
            total_scraped: 3,
            valid: 2,
            failed_sources: 1,
            proxy_kind: ProxyKind::Https,
            output: PathBuf::from("/tmp/proxies.txt"),
            added: 2,
            total: 5,
        };
        let lines = summary_lines(&summary);
        assert_eq!(lines[0], ("Scraped proxies", "3".to_string()));
        assert_eq!(lines[1], ("Valid proxies", "2".to_string()));
        assert_eq!(lines[2], ("Type", "HTTPS".to_string()));
        assert_eq!(lines[5], ("Total in file", "5".to_string()));
    }
}
