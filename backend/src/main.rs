//! `pocket-money`: print each kid's ledger summary from the configured data file.
//!
//! Pass `--json` to print the summaries as JSON instead.

use anyhow::Result;
use log::info;

use pocket_money_backend::config::AppConfig;
use pocket_money_backend::domain::commands::kids::KidWithTotals;
use pocket_money_backend::mappers::KidMapper;
use pocket_money_backend::Backend;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();
    info!("Starting pocket-money with data file {:?}", config.data_file_path());

    let backend = Backend::from_config(&config)?;
    let kids = backend.kid_service.list_kids()?;

    if std::env::args().skip(1).any(|arg| arg == "--json") {
        let summaries: Vec<_> = kids
            .iter()
            .map(|k| KidMapper::to_summary_dto(&k.kid, &k.totals))
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let settings = backend.settings_service.get_settings()?;
    let current = backend.settings_service.current_period()?;
    println!(
        "Current period: {}",
        backend.calendar.format_display(&current, true)
    );

    if kids.is_empty() {
        println!("No kids yet.");
    }
    for kid in &kids {
        print_kid(&backend, kid, &settings.currency);
    }
    Ok(())
}

fn print_kid(backend: &Backend, kid: &KidWithTotals, currency: &str) {
    let totals = &kid.totals;
    println!();
    println!(
        "{} ({}/{}/{}, {}% interest)",
        kid.kid.name,
        kid.kid.allocation.spent,
        kid.kid.allocation.saved,
        kid.kid.allocation.given,
        kid.kid.interest_rate
    );
    for row in &totals.entries {
        println!(
            "  {:<10} {:>9.2} {}  saved {:>9.2}  interest {:>7.2}  used {:>7.2}",
            backend.calendar.format_short(&row.entry.period),
            row.entry.amount,
            currency,
            row.running_saved,
            row.interest_earned,
            row.entry.used_from_saved
        );
    }
    println!(
        "  spent {:.2}  saved {:.2}  given {:.2}  interest {:.2}  total {:.2} {}",
        totals.total_spent,
        totals.total_saved,
        totals.total_given,
        totals.total_interest,
        totals.grand_total,
        currency
    );
}
