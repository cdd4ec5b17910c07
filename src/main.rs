//! Mortgage Simulator CLI
//!
//! Compare lender offers, print a full schedule, or check subsidy eligibility

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mortgage_simulator::amortization::export::{write_schedule_csv_path, write_summaries_csv_path};
use mortgage_simulator::amortization::{
    AmortizationSystem, FinancingEngine, FinancingResult, LoanRequest, OfferSummary, STANDARD_TERMS,
};
use mortgage_simulator::eligibility::check_subsidy_eligibility;
use mortgage_simulator::lenders::{load_lender_config, LenderConfig, LenderId, DEFAULT_REFERENCE_INDEX};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mortgage-sim", version, about = "Mortgage financing simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price the loan with several lenders and highlight the best offer
    Compare {
        #[command(flatten)]
        loan: LoanArgs,

        #[command(flatten)]
        market: MarketArgs,

        /// Lender ids to compare (repeatable; defaults to every configured lender)
        #[arg(long = "lender")]
        lenders: Vec<LenderId>,

        /// Also write one summary row per offer to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print every installment for one lender
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,

        #[command(flatten)]
        market: MarketArgs,

        /// Lender id
        #[arg(long)]
        lender: LenderId,

        /// Write the schedule to this CSV file instead of printing it
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check subsidized housing program eligibility
    Eligibility {
        #[arg(long)]
        property_value: f64,

        #[arg(long)]
        monthly_income: f64,

        /// The property is used rather than newly built
        #[arg(long)]
        used: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct LoanArgs {
    /// Property value
    #[arg(long)]
    property_value: f64,

    /// Cash down payment
    #[arg(long, default_value_t = 0.0)]
    down_payment: f64,

    /// Subsidy fund amount added to the down payment
    #[arg(long, default_value_t = 0.0)]
    subsidy_fund: f64,

    /// Term in months
    #[arg(long, default_value_t = 360)]
    term: u32,

    /// Amortization system (PRICE or SAC)
    #[arg(long, default_value = "PRICE")]
    system: AmortizationSystem,
}

impl LoanArgs {
    fn request(&self) -> LoanRequest {
        if !STANDARD_TERMS.contains(&self.term) {
            log::info!("Term {} is not one of the standard terms {:?}", self.term, STANDARD_TERMS);
        }
        LoanRequest::with_subsidy_fund(
            self.property_value,
            self.down_payment,
            self.subsidy_fund,
            self.term,
            self.system,
        )
    }
}

#[derive(Debug, Args)]
struct MarketArgs {
    /// CSV lender table (LenderID,Name,Spread,MinDownPayment,MaxTerm)
    #[arg(long)]
    lenders_csv: Option<PathBuf>,

    /// Reference index (annual %) lender spreads are added to
    #[arg(long)]
    reference_index: Option<f64>,
}

impl MarketArgs {
    fn config(&self) -> Result<LenderConfig> {
        let reference_index = self.reference_index.unwrap_or(DEFAULT_REFERENCE_INDEX);

        match &self.lenders_csv {
            Some(path) => load_lender_config(path, reference_index)
                .with_context(|| format!("Failed to load lenders from {}", path.display())),
            None => LenderConfig::default_market()
                .with_reference_index(reference_index)
                .context("Invalid reference index"),
        }
    }
}

/// One lender's row in the JSON comparison report
#[derive(Debug, Serialize)]
struct OfferEntry {
    lender_id: LenderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    offer: Option<OfferSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    limit_breaches: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ComparisonReport {
    request: LoanRequest,
    best_offer: Option<LenderId>,
    offers: Vec<OfferEntry>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compare { loan, market, lenders, csv, json } => {
            run_compare(&loan, &market, &lenders, csv, json)
        }
        Command::Schedule { loan, market, lender, csv, json } => run_schedule(&loan, &market, lender, csv, json),
        Command::Eligibility { property_value, monthly_income, used, json } => {
            run_eligibility(property_value, monthly_income, !used, json)
        }
    }
}

fn run_compare(
    loan: &LoanArgs,
    market: &MarketArgs,
    lenders: &[LenderId],
    csv: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let engine = FinancingEngine::new(market.config()?);
    let request = loan.request();

    let lender_ids = if lenders.is_empty() {
        engine.config().lender_ids()
    } else {
        lenders.to_vec()
    };

    let comparison = engine.compare_offers(&request, &lender_ids);
    let best = comparison.best_offer();

    let entries: Vec<OfferEntry> = comparison
        .outcomes()
        .iter()
        .map(|outcome| OfferEntry {
            lender_id: outcome.lender_id,
            offer: outcome.offer().map(FinancingResult::summary),
            error: outcome.error().map(|e| e.to_string()),
            limit_breaches: engine
                .limit_breaches(&request, outcome.lender_id)
                .map(|breaches| breaches.iter().map(|b| b.to_string()).collect())
                .unwrap_or_default(),
        })
        .collect();

    if let Some(path) = csv {
        let summaries: Vec<OfferSummary> = comparison.offers().map(FinancingResult::summary).collect();
        write_summaries_csv_path(&path, &summaries)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("{} offer rows written to {}", summaries.len(), path.display());
    }

    if json {
        let report = ComparisonReport {
            request,
            best_offer: best,
            offers: entries,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Property value: {:>14.2}", request.property_value);
    println!(
        "Down payment:   {:>14.2}  (cash {:.2} + subsidy fund {:.2})",
        request.down_payment,
        request.cash_down_payment(),
        request.subsidy_fund
    );
    println!("Loan amount:    {:>14.2}", request.loan_amount());
    println!("Term:           {:>14}  {}", request.term_months, request.system);
    println!();

    println!(
        "{:>4} {:<12} {:>9} {:>9} {:>14} {:>14} {:>16} {:>16}",
        "Id", "Lender", "Annual%", "Month%", "First", "Last", "Total paid", "Total interest"
    );
    println!("{}", "-".repeat(101));

    for entry in &entries {
        let marker = if Some(entry.lender_id) == best { "*" } else { " " };
        match (&entry.offer, &entry.error) {
            (Some(o), _) => println!(
                "{:>4} {:<12} {:>9.2} {:>9.4} {:>14.2} {:>14.2} {:>16.2} {:>16.2} {}",
                o.lender_id,
                o.lender_name,
                o.annual_rate,
                o.monthly_rate_percent,
                o.first_installment,
                o.last_installment,
                o.total_paid,
                o.total_interest,
                marker,
            ),
            (None, Some(err)) => println!("{:>4} {:<12} {}", entry.lender_id, "-", err),
            (None, None) => {}
        }
        for breach in &entry.limit_breaches {
            println!("{:>4} {:<12} warning: {}", "", "", breach);
        }
    }

    match best.and_then(|id| comparison.get(id)) {
        Some(offer) => println!(
            "\nBest offer*: {} with a first installment of {:.2}",
            offer.lender_name,
            offer.first_installment()
        ),
        None => println!("\nNo lender produced an offer"),
    }

    Ok(())
}

fn run_schedule(
    loan: &LoanArgs,
    market: &MarketArgs,
    lender: LenderId,
    csv: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let engine = FinancingEngine::new(market.config()?);
    let request = loan.request();

    let result = engine.calculate_financing(&request, lender)?;
    for breach in engine.limit_breaches(&request, lender)? {
        log::warn!("{}: {}", result.lender_name, breach);
    }

    if let Some(path) = csv {
        write_schedule_csv_path(&path, &result.installments)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Schedule written to: {}", path.display());
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Installment schedule - {}", result.lender_name);
    println!("Date: {}", chrono::Local::now().format("%d/%m/%Y"));
    println!();
    println!("  Property value: {:.2}", request.property_value);
    println!("  Down payment:   {:.2}", request.down_payment);
    if request.subsidy_fund > 0.0 {
        println!("    cash:         {:.2}", request.cash_down_payment());
        println!("    subsidy fund: {:.2}", request.subsidy_fund);
    }
    println!("  Loan amount:    {:.2}", result.loan_amount);
    println!("  Term:           {} months", request.term_months);
    println!("  System:         {}", request.system);
    println!("  Annual rate:    {:.2}%", result.annual_rate);
    println!("  Monthly rate:   {:.4}%", result.monthly_rate_percent());
    println!();

    println!("{:>5} {:>14} {:>14} {:>14} {:>16}", "No.", "Value", "Amortization", "Interest", "Balance");
    println!("{}", "-".repeat(67));
    for inst in &result.installments {
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
            inst.number, inst.value, inst.amortization, inst.interest, inst.balance
        );
    }

    println!("\nTotal paid:     {:.2}", result.total_paid);
    println!("Total interest: {:.2}", result.total_interest);

    Ok(())
}

fn run_eligibility(property_value: f64, monthly_income: f64, is_new_property: bool, json: bool) -> Result<()> {
    let result = check_subsidy_eligibility(property_value, monthly_income, is_new_property);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.rate {
        Some(rate) => println!("Qualifies for the subsidized program at {:.2}% a year", rate),
        None => println!("Does not qualify for the subsidized program"),
    }

    Ok(())
}
