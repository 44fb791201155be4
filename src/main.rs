use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use prestige_dash::view::render_role_options;
use prestige_dash::{
    DashboardConfig, DashboardView, DataStore, MetricEngine, PercentileFormat, RoleSelection,
};

/// Prestige percentile and talent-flow rankings for one company
#[derive(Debug, Parser)]
#[command(name = "prestige-dash", version, about)]
struct Cli {
    /// JSON configuration file; missing settings use their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the input tables
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Role category to include; repeat for several, omit or pass "All" for every role
    #[arg(short, long = "role")]
    roles: Vec<String>,

    /// Print the selectable role categories and exit
    #[arg(long)]
    list_roles: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Override the configured percentile format
    #[arg(long, value_enum)]
    percentile_format: Option<PercentileArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PercentileArg {
    Percent,
    Ordinal,
}

impl From<PercentileArg> for PercentileFormat {
    fn from(arg: PercentileArg) -> Self {
        match arg {
            PercentileArg::Percent => Self::Percent,
            PercentileArg::Ordinal => Self::Ordinal,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.tables.data_dir = dir;
    }
    if let Some(format) = cli.percentile_format {
        config.presentation.percentile_format = format.into();
    }
    info!("{config}");

    let store = DataStore::load(&config).context("Failed to load dashboard data")?;

    let mut stdout = std::io::stdout().lock();
    if cli.list_roles {
        writeln!(stdout, "{}", render_role_options(store.role_options()))?;
        return Ok(());
    }

    let selection = RoleSelection::from_values(cli.roles);
    for category in selection.categories() {
        if !store.role_options().iter().any(|o| o == category) {
            log::warn!("Role category '{category}' is not among the offered options");
        }
    }

    let snapshot = MetricEngine::new(&store).query(&selection);
    if let Err(e) = &snapshot.prestige {
        log::warn!("{e}");
    }

    let view = DashboardView::from_snapshot(&snapshot, &config.presentation);
    match cli.format {
        OutputFormat::Text => write!(stdout, "{}", view.render_text())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &view)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
