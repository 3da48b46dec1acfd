use colored::*;
use modelcat_core::format::{grouped_text, or_not_applicable, parameter_count_text};
use modelcat_core::{
    CatalogClient, ComparePage, DetailPage, FilterDomains, ModelRecord, PerformanceRecord,
    SortColumn,
};
use tabled::builder::Builder;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Model")]
    name: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Released")]
    released: String,
    #[tabled(rename = "Params")]
    params: String,
    #[tabled(rename = "Context")]
    context: String,
    #[tabled(rename = "License")]
    license: String,
}

impl ModelRow {
    fn from_model(m: &ModelRecord) -> Self {
        ModelRow {
            id: m.id,
            name: m.name.clone(),
            provider: m.provider_name.clone(),
            released: or_not_applicable(m.release_date.as_deref()),
            params: parameter_count_text(m.parameter_count),
            context: grouped_text(m.context_size),
            license: or_not_applicable(m.license.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Benchmark")]
    benchmark: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Dataset")]
    dataset: String,
}

pub fn display_error(message: &str) {
    println!("\n{}", message.red());
}

pub fn display_catalog(models: &[&ModelRecord], total: usize, sort: Option<SortColumn>) {
    println!("\n{}", "=== Model Catalog ===".bold().cyan());
    match sort {
        Some(column) => println!(
            "Showing {} of {} models (sorted by {})\n",
            models.len(),
            total,
            column.label()
        ),
        None => println!("Showing {} of {} models\n", models.len(), total),
    }

    if models.is_empty() {
        println!("{}", "No models match the selected filters.".yellow());
        return;
    }

    let rows: Vec<ModelRow> = models.iter().map(|m| ModelRow::from_model(m)).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

pub fn display_filter_domains(domains: &FilterDomains, client: &CatalogClient) {
    println!("\n{}", "=== Filters ===".bold().cyan());
    println!();

    println!("{}", "Providers:".bold().underline());
    for provider in &domains.providers {
        match client.logo_url(provider.logo.as_deref()) {
            Some(logo) => println!("  {} {}", provider.name, format!("({})", logo).dimmed()),
            None => println!("  {}", provider.name),
        }
    }
    println!();

    println!("{}", "Licenses:".bold().underline());
    for license in &domains.licenses {
        println!("  {}", license);
    }
    println!();

    println!("{}", "Ranges:".bold().underline());
    match domains.parameter_range {
        Some(r) => println!(
            "  Parameters: {} - {} ({} - {} M)",
            parameter_count_text(Some(r.min)),
            parameter_count_text(Some(r.max)),
            grouped_text(Some(r.min)),
            grouped_text(Some(r.max))
        ),
        None => println!("  Parameters: N/A"),
    }
    match domains.context_range {
        Some(r) => println!(
            "  Context: {} - {} tokens",
            grouped_text(Some(r.min)),
            grouped_text(Some(r.max))
        ),
        None => println!("  Context: N/A"),
    }
    println!();
}

fn print_model_fields(m: &ModelRecord) {
    println!("{}: {}", "Provider".bold(), m.provider_name);
    println!("{}: {}", "Website".bold(), or_not_applicable(m.provider_website.as_deref()));
    println!("{}: {}", "Developer".bold(), or_not_applicable(m.developer.as_deref()));
    println!("{}: {}", "Release Date".bold(), or_not_applicable(m.release_date.as_deref()));
    println!("{}: {}", "Parameter Count".bold(), grouped_text(m.parameter_count));
    println!("{}: {}", "Context Size".bold(), grouped_text(m.context_size));
    println!("{}: {}", "Architecture Type".bold(), or_not_applicable(m.architecture_type.as_deref()));
    println!("{}: {}", "Training Data Size".bold(), or_not_applicable(m.training_data_size.as_deref()));
    println!("{}: {}", "License".bold(), or_not_applicable(m.license.as_deref()));
    println!("{}: {}", "Description".bold(), or_not_applicable(m.description.as_deref()));
    println!("{}: {}", "Use Cases".bold(), or_not_applicable(m.use_cases.as_deref()));
}

pub fn display_model_detail(page: &DetailPage) {
    match &page.model {
        Ok(model) => {
            println!("\n{}", format!("=== {} ===", model.name).bold().cyan());
            println!();
            print_model_fields(model);
        }
        Err(_) => {
            println!("\n{}", format!("=== Model {} ===", page.id).bold().cyan());
            if let Some(message) = page.model_message() {
                display_error(message);
            }
        }
    }
    println!();

    println!("{}", "Performance:".bold().underline());
    match &page.performance {
        Ok(records) => display_performance(records),
        Err(_) => {
            if let Some(message) = page.performance_message() {
                println!("  {}", message.red());
            }
        }
    }
    println!();
}

fn display_performance(records: &[PerformanceRecord]) {
    let rows: Vec<PerformanceRow> = records
        .iter()
        .map(|r| PerformanceRow {
            benchmark: r.benchmark_name.clone(),
            score: format!("{}", r.score),
            dataset: or_not_applicable(r.dataset_details.as_deref()),
        })
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

pub fn display_comparison(page: &ComparePage) {
    println!("\n{}", "=== Model Comparison ===".bold().cyan());
    println!();

    let mut builder = Builder::default();
    let mut header = vec![String::new()];
    header.extend(page.models.iter().map(|m| m.name.clone()));
    builder.push_record(header);

    let fields: [(&str, fn(&ModelRecord) -> String); 10] = [
        ("Provider", |m| m.provider_name.clone()),
        ("Developer", |m| or_not_applicable(m.developer.as_deref())),
        ("Release Date", |m| or_not_applicable(m.release_date.as_deref())),
        ("Parameter Count", |m| grouped_text(m.parameter_count)),
        ("Context Size", |m| grouped_text(m.context_size)),
        ("Architecture Type", |m| or_not_applicable(m.architecture_type.as_deref())),
        ("Training Data Size", |m| or_not_applicable(m.training_data_size.as_deref())),
        ("License", |m| or_not_applicable(m.license.as_deref())),
        ("Description", |m| or_not_applicable(m.description.as_deref())),
        ("Use Cases", |m| or_not_applicable(m.use_cases.as_deref())),
    ];
    for (label, value) in fields {
        let mut record = vec![label.to_string()];
        record.extend(page.models.iter().map(value));
        builder.push_record(record);
    }

    let table = builder.build().with(Style::rounded()).to_string();
    println!("{}", table);
}
