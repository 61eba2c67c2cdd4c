use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seoscope::config::ScoringConfig;
use seoscope::domain::models::{AuditResult, CompetitorComparison};
use seoscope::service::{AuditOptions, CompetitorComparator, SiteAuditor};

#[derive(Parser)]
#[command(name = "seoscope", about = "Audit a page's search discoverability", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Audit a single URL
    Audit {
        url: String,
        /// Emit the full result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Compare a URL against competitor URLs
    Compare {
        url: String,
        /// Competitor URL (repeatable, at most 9 are used)
        #[arg(short, long = "competitor", required = true)]
        competitors: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let auditor = SiteAuditor::new(ScoringConfig::default())?;

    match cli.command {
        Command::Audit { url, json } => {
            let result = auditor.audit(&url, AuditOptions::default()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_audit(&result);
            }
        }
        Command::Compare {
            url,
            competitors,
            json,
        } => {
            let comparison = CompetitorComparator::new(&auditor)
                .compare(&url, &competitors)
                .await;
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                print_comparison(&comparison);
            }
        }
    }

    Ok(())
}

fn print_audit(result: &AuditResult) {
    println!("Audit of {}", result.url);
    println!(
        "  Overall {}  Technical {}  Content {}",
        result.scores.overall, result.scores.technical, result.scores.content
    );
    if let Some(speed) = result.scores.speed {
        println!("  Speed {}", speed);
    }
    if let Some(local) = result.scores.local_seo {
        println!("  Local {}", local);
    }

    if result.all_checks_passed() {
        println!("  All checks passed");
    } else {
        println!("  Issues ({}):", result.issues.len());
        for issue in &result.issues {
            println!(
                "    [{}] {} - {}",
                issue.severity.as_str(),
                issue.title,
                issue.description
            );
        }
    }

    if !result.content.keywords.is_empty() {
        println!("  Top keywords:");
        for keyword in &result.content.keywords {
            println!(
                "    {:<20} {:>4}x  {:>6.2}%",
                keyword.word, keyword.count, keyword.density
            );
        }
    }
    println!(
        "  {} words, readability {} ({})",
        result.content.word_count,
        result.content.readability,
        result.content.readability_level.as_str()
    );
}

fn print_comparison(comparison: &CompetitorComparison) {
    println!(
        "Reference {} scored {}",
        comparison.reference.url, comparison.reference.scores.overall
    );
    for competitor in &comparison.competitors {
        let note = if competitor.is_zero_score_placeholder() {
            " (could not be fetched)"
        } else {
            ""
        };
        println!(
            "  Competitor {} scored {}{}",
            competitor.url, competitor.scores.overall, note
        );
    }

    if comparison.gaps.is_empty() {
        println!("No score gaps against the competitor average");
    } else {
        println!("Gaps:");
        for gap in &comparison.gaps {
            println!(
                "  {}: you {} vs avg {:.0} (gap {}) - {}",
                gap.area, gap.your_score, gap.competitor_avg, gap.gap, gap.recommendation
            );
        }
    }

    println!("Opportunities:");
    for opportunity in &comparison.opportunities {
        println!("  - {}", opportunity);
    }
}
