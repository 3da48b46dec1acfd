mod display;
mod tui_app;
mod tui_events;
mod tui_ui;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use modelcat_core::client::DEFAULT_BASE_URL;
use modelcat_core::format::{parse_grouped, parse_parameter_count};
use modelcat_core::{
    CatalogClient, CatalogPage, ClientConfig, ComparePage, DetailPage, FilterDomains,
    FilterState, LicenseChoice, ModelId, ModelRecord, NumericRange, PageError, Panel,
    RangeFilter, SortColumn, filter_models, sort_models,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modelcat")]
#[command(about = "Browse, filter and compare LLM models from a catalog API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the catalog API
    #[arg(long, global = true, env = "MODELCAT_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use classic CLI table output instead of TUI
    #[arg(long)]
    cli: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List models, filtered and sorted client-side
    List(ListArgs),

    /// Show the providers, licenses and ranges available for filtering
    Filters {
        /// Pass KEY=VALUE through to the server as a query parameter
        #[arg(long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        query: Vec<(String, String)>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details and benchmark scores for one model
    Info {
        /// Model ID
        id: Option<ModelId>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two models side by side
    Compare {
        /// First model ID
        model1: Option<ModelId>,

        /// Second model ID
        model2: Option<ModelId>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Default)]
struct ListArgs {
    /// Pass KEY=VALUE through to the server as a query parameter
    #[arg(long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    query: Vec<(String, String)>,

    /// Keep only models from this provider (repeatable)
    #[arg(short, long)]
    provider: Vec<String>,

    /// Keep only models with exactly this license
    #[arg(long, conflicts_with = "unspecified_license")]
    license: Option<String>,

    /// Keep only models with no license listed
    #[arg(long)]
    unspecified_license: bool,

    /// Minimum parameter count (e.g. 7B, 500M, 13000)
    #[arg(long, value_name = "COUNT", value_parser = parse_params)]
    min_params: Option<u64>,

    /// Maximum parameter count (e.g. 70B)
    #[arg(long, value_name = "COUNT", value_parser = parse_params)]
    max_params: Option<u64>,

    /// Minimum context size in tokens (e.g. 8192 or 128,000)
    #[arg(long, value_name = "TOKENS", value_parser = parse_tokens)]
    min_context: Option<u64>,

    /// Maximum context size in tokens
    #[arg(long, value_name = "TOKENS", value_parser = parse_tokens)]
    max_context: Option<u64>,

    /// Sort ascending by column: name, provider, released, params, context, license
    #[arg(short, long, value_name = "COLUMN")]
    sort: Option<SortColumn>,

    /// Limit number of results
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

fn parse_params(s: &str) -> Result<u64, String> {
    parse_parameter_count(s)
        .ok_or_else(|| format!("could not parse '{}' (expected e.g. 7B, 500M, 13000)", s))
}

fn parse_tokens(s: &str) -> Result<u64, String> {
    parse_grouped(s).ok_or_else(|| format!("could not parse '{}' as a token count", s))
}

/// A range selection from optional CLI bounds. Any bound given on the
/// command line drops records that have no value.
fn range_from_bounds(
    domain: Option<NumericRange>,
    low: Option<u64>,
    high: Option<u64>,
) -> Option<RangeFilter> {
    if low.is_none() && high.is_none() {
        return domain.map(RangeFilter::full);
    }
    let domain = domain.unwrap_or(NumericRange {
        min: 0,
        max: u64::MAX,
    });
    Some(RangeFilter::requested(
        domain,
        low.unwrap_or(domain.min),
        high.unwrap_or(domain.max),
    ))
}

fn build_filter_state(domains: &FilterDomains, args: &ListArgs) -> FilterState {
    let mut state = FilterState::unrestricted(domains);
    state.providers = args.provider.iter().cloned().collect();
    state.license = match (&args.license, args.unspecified_license) {
        (Some(name), _) => LicenseChoice::Named(name.clone()),
        (None, true) => LicenseChoice::Unspecified,
        (None, false) => LicenseChoice::Any,
    };
    state.parameter_count =
        range_from_bounds(domains.parameter_range, args.min_params, args.max_params);
    state.context_size =
        range_from_bounds(domains.context_range, args.min_context, args.max_context);
    state
}

/// Render a failed page load. Empty results are not failures.
fn report(err: &PageError, panel: Panel) -> bool {
    display::display_error(err.message(panel));
    err.is_empty()
}

fn print_json<T: serde::Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            false
        }
    }
}

fn run_list(client: &CatalogClient, args: &ListArgs) -> bool {
    let page = match CatalogPage::load(client, &args.query) {
        Ok(page) => page,
        Err(e) => return report(&e, Panel::Catalog),
    };

    let state = build_filter_state(page.domains(), args);
    let mut rows: Vec<&ModelRecord> = filter_models(page.all_models(), &state);
    tracing::debug!(
        matched = rows.len(),
        total = page.all_models().len(),
        restricted = state.is_restricted(),
        "applied filters"
    );
    if let Some(column) = args.sort {
        sort_models(&mut rows, column);
    }
    if let Some(n) = args.limit {
        rows.truncate(n);
    }

    if args.json {
        return print_json(&rows);
    }
    display::display_catalog(&rows, page.all_models().len(), args.sort);
    true
}

fn run_filters(client: &CatalogClient, query: &[(String, String)], json: bool) -> bool {
    let page = match CatalogPage::load(client, query) {
        Ok(page) => page,
        Err(e) => return report(&e, Panel::Catalog),
    };
    if json {
        return print_json(page.domains());
    }
    display::display_filter_domains(page.domains(), client);
    true
}

fn run_info(client: &CatalogClient, id: Option<ModelId>, json: bool) -> bool {
    let page = match DetailPage::load(client, id) {
        Ok(page) => page,
        Err(e) => {
            display::display_error(e.message(Panel::Details));
            return false;
        }
    };

    if json {
        let model = page.model.as_ref().ok();
        let performance = page.performance.as_ref().ok();
        return print_json(&serde_json::json!({
            "model": model,
            "performance": performance,
        }));
    }
    display::display_model_detail(&page);
    page.model.is_ok()
}

fn run_compare(
    client: &CatalogClient,
    first: Option<ModelId>,
    second: Option<ModelId>,
    json: bool,
) -> bool {
    let page = match ComparePage::load(client, first, second) {
        Ok(page) => page,
        Err(e) => {
            display::display_error(e.message(Panel::Comparison));
            return false;
        }
    };
    if json {
        return print_json(&page.models);
    }
    display::display_comparison(&page);
    true
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Draw and dispatch events until the app asks to quit.
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut ratatui::Terminal<B>,
    app: &mut tui_app::App,
    mut next_event: impl FnMut(&mut tui_app::App) -> std::io::Result<bool>,
) -> std::io::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| tui_ui::draw(frame, app))?;
        next_event(app)?;
    }
    Ok(())
}

fn run_tui(client: CatalogClient) -> std::io::Result<()> {
    // Raw mode + alternate screen; also installs a panic hook that restores them.
    let mut terminal = ratatui::try_init()?;

    let mut app = tui_app::App::new(client);
    let result = run_app(&mut terminal, &mut app, tui_events::handle_events);

    // Restore the terminal whether or not the loop failed.
    let restored = ratatui::try_restore();
    result.and(restored)
}

fn main() {
    let cli = Cli::parse();

    let client = CatalogClient::new(ClientConfig {
        base_url: cli.api_url.clone(),
        timeout: Duration::from_secs(cli.timeout),
    });

    let interactive = cli.command.is_none() && !cli.cli;
    // The TUI owns the terminal; a stderr logger would draw over it.
    if !interactive {
        init_logging(cli.verbose);
        tracing::info!(api = %client.base_url(), "using catalog API");
    }

    // If a subcommand is given, use classic CLI mode
    if let Some(command) = cli.command {
        let ok = match command {
            Commands::List(args) => run_list(&client, &args),
            Commands::Filters { query, json } => run_filters(&client, &query, json),
            Commands::Info { id, json } => run_info(&client, id, json),
            Commands::Compare {
                model1,
                model2,
                json,
            } => run_compare(&client, model1, model2, json),
        };
        if !ok {
            std::process::exit(1);
        }
        return;
    }

    // If --cli flag, print the full catalog table
    if cli.cli {
        if !run_list(&client, &ListArgs::default()) {
            std::process::exit(1);
        }
        return;
    }

    // Default: launch TUI
    if let Err(e) = run_tui(client) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
