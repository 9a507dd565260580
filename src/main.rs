// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Discover and read every markdown page, then validate their links
// 3. Print the report (text or JSON) on stdout
// 4. Exit with proper code (0 = no problems, 1 = problems found, 2 = error)
// =============================================================================

mod checker; // src/checker/ - extraction, resolution and validation of links
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - site layout settings
mod crawl; // src/crawl/ - the concurrent discovery and validation phases
mod error; // src/error.rs - page and link errors
mod logger; // src/logger.rs - progress messages on stderr
mod report; // src/report.rs - text and JSON report
mod site; // src/site/ - pages, links and the registry

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use report::{Report, EXIT_ERROR};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            log!("error"; "{:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    let config = cli.site_config()?;
    let pages = crawl::check_site(config).await?;
    let report = Report::new(pages, cli.verbose);

    if cli.json {
        println!("{}", report.render_json()?);
    } else {
        println!();
        print!("{}", report.render_text());
    }

    let problems = report.totals().problems;
    if problems > 0 {
        log!("report"; "{} problems detected", problems);
    }
    Ok(report.exit_code())
}
