use dotenvy::dotenv;
use sales_tracker::{
    config::{
        seed::load_seed,
        settings::{OutputFormat, Settings},
    },
    core::{
        calendar::FixedClock,
        dashboard::Dashboard,
        hooks::RowExporter,
        projector::Row,
        report::{format_performance, format_rows_table},
    },
    entities::NodeRef,
    errors::Result,
};
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Writes each exported view to stdout as one JSON document.
struct JsonExporter<W: Write> {
    out: W,
}

impl<W: Write> RowExporter for JsonExporter<W> {
    fn export(&mut self, title: &str, rows: &[Row]) -> Result<()> {
        let document = serde_json::json!({ "title": title, "rows": rows });
        serde_json::to_writer_pretty(&mut self.out, &document)?;
        writeln!(self.out)?;
        Ok(())
    }
}

fn main() -> Result<()> {
    // 1. Initialize tracing (stderr, so JSON output stays clean)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // 2. Load .env file
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 3. Settings
    let settings = Settings::from_env()
        .inspect_err(|e| error!("Invalid settings: {}", e))?;
    info!(seed = %settings.seed_path.display(), "Settings loaded");

    // 4. Seed
    let seed = load_seed(&settings.seed_path)
        .inspect_err(|e| error!("Failed to load seed: {}", e))?;
    let store = seed.build_store()?;

    // 5. Dashboard
    let mut dashboard = Dashboard::new(store).with_page_size(settings.page_size);
    for (level, groups) in seed.groups_by_level() {
        dashboard = dashboard.with_groups(level, groups);
    }
    if let Some(date) = settings.reference_date {
        dashboard = dashboard.with_clock(FixedClock(date));
    }
    let period = dashboard.trailing_period(settings.view_days);

    // 6. Output
    match settings.output {
        OutputFormat::Json => {
            let mut exporter = JsonExporter { out: io::stdout().lock() };
            dashboard.export(&mut exporter, &period)?;
        }
        OutputFormat::Text => {
            let mut out = io::stdout().lock();
            let page = dashboard.rows_page(&period, 1)?;
            writeln!(out, "{}", dashboard.subtitle()?)?;
            write!(out, "{}", format_rows_table(&dashboard.title()?, &page.rows, &period))?;
            writeln!(out, "page {}/{}", page.page, page.total_pages.max(1))?;
            writeln!(out)?;

            writeln!(out, "Performance on {}", dashboard.today())?;
            for client in dashboard.store().clients() {
                let result = dashboard.performance(&NodeRef::client(&client.id))?;
                writeln!(out, "  {}", format_performance(&client.name, &result))?;
            }
        }
    }

    Ok(())
}
