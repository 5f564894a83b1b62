use anyhow::{Result, bail};
use sozluk::{
    config::{Config, OutputFormat},
    lookup::LookupService,
    sites::{self, SiteId},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let mut args = std::env::args().skip(1);
    let Some(term) = args.next() else {
        bail!("usage: lookup <term> [site...]  (sites: tureng, tdk, oxford, nisanyan, all)");
    };
    let site_args: Vec<String> = args.collect();

    let service = LookupService::new(config.sanitize());

    if site_args.is_empty() {
        service.dispatch(&term, *sites::by_id(config.default_site()));
    } else if site_args.iter().any(|name| name == "all") {
        service.dispatch_all(&term);
    } else {
        for name in &site_args {
            let id: SiteId = name.parse()?;
            service.dispatch(&term, *sites::by_id(id));
        }
    }

    // Lookups are fire-and-forget; drain them before reading the panel.
    service.wait_idle().await;

    let Some(entry) = service.panel().current() else {
        eprintln!("no results for '{term}'");
        std::process::exit(1);
    };

    match config.output() {
        OutputFormat::Html => println!("{}", entry.html),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }

    Ok(())
}
