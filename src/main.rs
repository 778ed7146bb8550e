use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use time::{Date, OffsetDateTime, macros::format_description};
use tracing_subscriber::EnvFilter;

use rwa_lend::core::{
    Config,
    asset::{AssetDraft, AssetKind, UploadPolicy, UploadedFile, review_stages},
    catalog::{self, VALUATION_ESTIMATE},
    config::millis,
    custody::{CustodyEvent, CustodyMethod, CustodyProcess},
    fraction::{DEFAULT_FRAGMENT_VALUE, FractionCalculator},
    gate::{Point, ReadGate, ScrollMetrics, SignatureGate},
    kyc::{IdType, KycFlow},
    loan::{DEFAULT_PRINCIPAL, LoanCalculator, LoanTerm},
    money::{format_amount, format_decimal, format_percent},
    processing::{ProcessingEvent, ProcessingPlan, ProcessingState},
    route::{LoanPayload, NavPayload, Route, Router},
    session::{Session, WalletConnection, WalletEvent, WalletKind},
};

#[derive(Parser)]
#[command(name = "rwa_lend")]
#[command(about = "Tokenize real-world assets and borrow against them (simulated)")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file overriding the default settings
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the desktop app (default)
    Gui,
    /// Quote a loan against an appraised asset
    Loan {
        /// Appraised value of the collateral
        #[arg(long, default_value_t = 15_000_000)]
        valuation: u64,
        #[arg(long, default_value_t = DEFAULT_PRINCIPAL)]
        principal: u64,
        /// Term in days: 30, 90, 180 or 365
        #[arg(long, default_value_t = 180)]
        term: u32,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,
        /// Override the annual interest rate
        #[arg(long)]
        rate: Option<f64>,
        /// Override the loan-to-value cap
        #[arg(long)]
        max_ltv: Option<f64>,
        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// Plan the fractionalization of an asset
    Fraction {
        #[arg(long, default_value_t = VALUATION_ESTIMATE)]
        asset_value: u64,
        #[arg(long, default_value_t = DEFAULT_FRAGMENT_VALUE)]
        fragment_value: u64,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the whole journey headless, printing each simulated event
    Journey {
        #[arg(long, default_value = "real-estate")]
        kind: AssetKind,
        /// Divide every simulated delay by this factor
        #[arg(long, default_value_t = 1)]
        speed: u64,
    },
    /// List the application's pages
    Routes,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(args.config.as_deref())?;

    match args.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(config),
        Command::Loan {
            valuation,
            principal,
            term,
            start,
            rate,
            max_ltv,
            json,
        } => {
            if let Some(rate) = rate {
                config.lending.annual_rate = rate;
            }
            if let Some(max_ltv) = max_ltv {
                config.lending.loan_max_ltv = max_ltv;
            }
            config.validate()?;
            let term = LoanTerm::try_from(term)?;
            let start = match start {
                Some(raw) => parse_date(&raw)?,
                None => today(),
            };
            print_loan(&config, valuation, principal, term, start, json)
        }
        Command::Fraction {
            asset_value,
            fragment_value,
            json,
        } => print_fraction(&config, asset_value, fragment_value, json),
        Command::Journey { kind, speed } => {
            config.timings = config.timings.accelerated(speed);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(journey(config, kind))
        }
        Command::Routes => {
            for route in Route::table() {
                let payload = match route.required_payload() {
                    Some(kind) => format!("requires {kind:?} payload"),
                    None => String::new(),
                };
                println!("{:<32} {:<28} {}", route.path(), route.title(), payload);
            }
            Ok(())
        }
    }
}

#[cfg(feature = "gui")]
fn run_gui(config: Config) -> anyhow::Result<()> {
    rwa_lend::gui::run(config)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: Config) -> anyhow::Result<()> {
    anyhow::bail!("this build has no GUI; rebuild with the `gui` feature")
}

fn parse_date(raw: &str) -> anyhow::Result<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format).with_context(|| format!("Invalid date {raw:?}, expected YYYY-MM-DD"))
}

fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

fn print_loan(
    config: &Config,
    valuation: u64,
    principal: u64,
    term: LoanTerm,
    start: Date,
    json: bool,
) -> anyhow::Result<()> {
    let calculator = LoanCalculator::new(valuation, &config.lending)
        .with_context(|| format!("Asset valued at {} is not eligible", format_amount(valuation)))?;
    let quote = calculator.quote(principal, term);

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    if quote.principal != principal {
        println!(
            "Requested {} adjusted to {}",
            format_amount(principal),
            format_amount(quote.principal)
        );
    }
    println!("\n=== Loan Quote ===");
    println!("Valuation:       {}", format_amount(valuation));
    println!(
        "Max principal:   {} (LTV {})",
        format_amount(calculator.max_principal()),
        format_percent(calculator.max_ltv() * 100.0)
    );
    println!("Principal:       {}", format_amount(quote.principal));
    println!("Term:            {}", quote.term);
    println!("Annual rate:     {}", format_percent(quote.annual_rate * 100.0));
    println!("Interest:        {}", format_amount(quote.interest));
    println!("Net disbursed:   {}", format_amount(quote.net_disbursed));
    println!("Due date:        {}", quote.due_date(start));
    Ok(())
}

fn print_fraction(
    config: &Config,
    asset_value: u64,
    fragment_value: u64,
    json: bool,
) -> anyhow::Result<()> {
    let calculator = FractionCalculator::new(asset_value, &config.lending).with_context(|| {
        format!(
            "Asset valued at {} cannot be fractionalized",
            format_amount(asset_value)
        )
    })?;
    let plan = calculator.plan(fragment_value);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("\n=== Fractionalization Plan ===");
    println!("Asset value:        {}", format_amount(plan.asset_value));
    println!(
        "Fragment value:     {} ({} of the asset)",
        format_amount(plan.fragment_value),
        format_percent(plan.used_percentage())
    );
    println!("Fragments:          {}", plan.fragment_count);
    println!("Value per fragment: {}", format_decimal(plan.value_per_fragment));
    println!(
        "Remaining value:    {} ({})",
        format_amount(plan.remaining_value),
        format_percent(plan.remaining_percentage())
    );
    Ok(())
}

/// Drive every simulated step of the app without a window.
async fn journey(config: Config, kind: AssetKind) -> anyhow::Result<()> {
    let timings = &config.timings;
    let mut router = Router::new();
    let mut session = Session::default();
    println!("[{}] connecting MetaMask", router.current().route);

    // 1. wallet
    let mut connection = WalletConnection::default();
    let timeline = connection
        .begin(WalletKind::MetaMask, timings)
        .context("wallet connection already in progress")?;
    let mut run = timeline.spawn();
    while let Some(event) = run.next().await {
        match event {
            WalletEvent::Connected => {
                session.wallet = connection.complete();
                if let Some(wallet) = &session.wallet {
                    println!("  wallet connected: {}", wallet.short_address());
                }
            }
            WalletEvent::Redirect => break,
        }
    }
    router.push(Route::KycVerification, NavPayload::None);

    // 2. kyc
    println!("[{}] submitting identity documents", router.current().route);
    let mut kyc = KycFlow::new(timings);
    kyc.form.full_name = session.profile.username.clone();
    kyc.form.id_type = Some(IdType::IdCard);
    kyc.form.id_number = "A123456789".to_string();
    kyc.form.birth_date = "1990-01-01".to_string();
    kyc.next_from_basic_info()?;
    kyc.form.id_document = Some(UploadedFile::new("id-front.jpg", 800_000, "image/jpeg"));
    kyc.form.selfie = Some(UploadedFile::new("selfie.jpg", 600_000, "image/jpeg"));
    let mut run = kyc.submit()?.spawn();
    while let Some(event) = run.next().await {
        if kyc.apply(event) {
            break;
        }
        println!("  kyc status: {:?}", kyc.status());
    }
    session.kyc = kyc.status();
    router.push(Route::AssetTokenization, NavPayload::None);

    // 3. submission
    println!("[{}] submitting a {} asset", router.current().route, kind);
    let policy = UploadPolicy::new(&config.uploads);
    let mut draft = AssetDraft::with_kind(kind);
    draft.name = catalog::nft_preview().name.to_string();
    draft.description = "Submitted from the command line".to_string();
    draft.add_files([UploadedFile::new("ownership.pdf", 1_200_000, "application/pdf")], &policy);
    draft.validate(&policy)?;
    tokio::time::sleep(millis(timings.asset_submit_ms)).await;
    for stage in review_stages(VALUATION_ESTIMATE) {
        println!("  {:<24} {}", stage.name, stage.state.label());
    }

    // 4. contract
    let mut read_gate = ReadGate::new(config.gates.scroll_threshold_px);
    read_gate.on_scroll(ScrollMetrics {
        offset: 1600.0,
        content_height: 2000.0,
        viewport_height: 400.0,
    });
    read_gate.confirm()?;
    let mut signature = SignatureGate::new();
    signature.pen_down(Point::new(10.0, 40.0));
    signature.pen_move(Point::new(120.0, 20.0));
    signature.pen_up();
    signature.confirm()?;
    println!("  contract read and signed");

    // 5. custody
    let mut custody = CustodyProcess::new(kind.into(), timings);
    let timeline = match custody.start() {
        Some(timeline) => timeline,
        None => custody
            .select_method(CustodyMethod::Pickup)
            .context("custody method already chosen")?,
    };
    let mut run = timeline.spawn();
    while let Some(event) = run.next().await {
        custody.apply(event);
        match event {
            CustodyEvent::Status(status) => println!("  custody: {}", status.label()),
            CustodyEvent::Finished => break,
        }
    }

    let nft = catalog::nft_preview();
    println!("  minted {} for {}", nft.token_id, nft.name);
    router.push(Route::MyAssets, NavPayload::None);

    // 6. loan
    let asset = catalog::default_loan_asset();
    let calculator = LoanCalculator::new(asset.valuation, &config.lending)?;
    let quote = calculator.default_quote();
    router.push(
        Route::LoanSetup {
            asset_id: asset.id.clone(),
        },
        NavPayload::Asset(asset.clone()),
    );
    println!(
        "[{}] borrowing {} for {}",
        router.current().route,
        format_amount(quote.principal),
        quote.term
    );
    let payload = NavPayload::Loan(LoanPayload { asset, quote });
    router.push(Route::LoanConfirm, payload.clone());
    router.push(Route::LoanProcessing, payload.clone());

    let plan = ProcessingPlan::loan(timings);
    let mut processing = ProcessingState::new(&plan);
    println!("  {}", processing.stepper().current_label().unwrap_or_default());
    let mut run = plan.timeline().spawn();
    while let Some(event) = run.next().await {
        let finished = processing.apply(event);
        if let ProcessingEvent::Step(_) = event {
            println!("  {}", processing.stepper().current_label().unwrap_or_default());
        }
        if finished {
            break;
        }
    }
    router.push(Route::LoanSuccess, payload);
    println!(
        "[{}] received {}",
        router.current().route,
        format_amount(quote.net_disbursed)
    );
    Ok(())
}
