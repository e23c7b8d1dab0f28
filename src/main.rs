//! Saccoview main entry point

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use saccoview_config::Config;
use saccoview_core::{
    AccountStatus, LedgerTransaction, SavingsAccount, TransactionStatus, TransactionType,
};
use saccoview_forms::{InMemoryDirectory, RegistrationForm, RegistrationRequest};
use saccoview_query::{
    FilterVocabulary, InMemoryQuery, PagedListController, RowFilter,
};
use saccoview_utils::format_number;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "saccoview")]
#[command(author = "Saccoview Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Member-records and ledger front-end core for a SACCO", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a registration payload and submit it to a demo directory
    Register {
        /// JSON file holding the registration payload
        file: PathBuf,

        /// Validate only, do not submit
        #[arg(long)]
        dry_run: bool,
    },

    /// Page through a demo data set with filters
    List {
        /// Which list view to drive
        resource: Resource,

        /// Filter as key=value; repeatable
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Page to show, 0-based
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Rows per page; must be one of the configured options
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Print the default configuration to stdout
    InitConfig,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Resource {
    Accounts,
    Transactions,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if let Command::InitConfig = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = if args.config.exists() {
        Config::load(args.config.clone())
            .with_context(|| format!("Failed to load {}", args.config.display()))?
    } else {
        log::warn!(
            "config file {} not found, using defaults",
            args.config.display()
        );
        Config::default()
    };

    let rt = Runtime::new()?;
    rt.block_on(async {
        match args.command {
            Command::Register { file, dry_run } => register(file, dry_run).await,
            Command::List {
                resource,
                filters,
                page,
                page_size,
            } => list(&config, resource, &filters, page, page_size).await,
            Command::InitConfig => Ok(()),
        }
    })
}

// ==================== Register ====================

async fn register(file: PathBuf, dry_run: bool) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let request: RegistrationRequest =
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", file.display()))?;

    let mut form = RegistrationForm::from_request(request);
    match form.validate() {
        Ok((member, next_of_kin)) => {
            println!(
                "Valid: member {} with {} next-of-kin entr{}",
                member.national_id,
                next_of_kin.len(),
                if next_of_kin.len() == 1 { "y" } else { "ies" }
            );
        }
        Err(errors) => {
            for error in errors.iter() {
                eprintln!("  {}", error);
            }
            bail!("Validation failed with {} error(s)", errors.len());
        }
    }

    if dry_run {
        return Ok(());
    }

    let directory = InMemoryDirectory::new();
    let id = form.submit(&directory).await?;
    println!("Registered as member #{}", id);
    Ok(())
}

// ==================== List ====================

async fn list(
    config: &Config,
    resource: Resource,
    filters: &[String],
    page: usize,
    page_size: Option<usize>,
) -> Result<()> {
    let options = config.pagination.page_size_options.clone();
    let default_size = config.pagination.default_page_size;

    match resource {
        Resource::Accounts => {
            let controller =
                PagedListController::new(FilterVocabulary::accounts(), options, default_size)?;
            let query = InMemoryQuery::new(demo_accounts());
            drive(controller, query, filters, page, page_size, |a: &SavingsAccount| {
                format!(
                    "{:<16} {:<8} {:>14} {:<8} {}",
                    a.account_number,
                    a.account_type,
                    format_number(a.balance),
                    a.status,
                    a.date_opened
                )
            })
            .await
        }
        Resource::Transactions => {
            let controller =
                PagedListController::new(FilterVocabulary::transactions(), options, default_size)?;
            let query = InMemoryQuery::new(demo_transactions());
            drive(controller, query, filters, page, page_size, |t: &LedgerTransaction| {
                format!(
                    "{:<18} {:<18} {:>12} {:<12} {}",
                    t.transaction_ref,
                    t.transaction_type,
                    format_number(t.amount),
                    t.status,
                    t.created_at.format("%Y-%m-%d %H:%M")
                )
            })
            .await
        }
    }
}

async fn drive<T, F>(
    mut controller: PagedListController<T>,
    query: InMemoryQuery<T>,
    filters: &[String],
    page: usize,
    page_size: Option<usize>,
    render: F,
) -> Result<()>
where
    T: RowFilter + Clone + Send + Sync,
    F: Fn(&T) -> String,
{
    if let Some(size) = page_size {
        controller.set_page_size(size)?;
    }
    for spec in filters {
        let (key, value) = spec
            .split_once('=')
            .with_context(|| format!("Filter must be key=value: {}", spec))?;
        controller.set_filter(key, value)?;
    }
    let ticket = controller.set_page(page);
    controller.dispatch(ticket, &query).await;

    if let Some(error) = controller.error() {
        bail!("{}", error);
    }

    let state = controller.state();
    let total = controller.total_count();
    let pages = (total as usize).div_ceil(state.page_size).max(1);
    println!(
        "Page {}/{} ({} row{} total)",
        state.page + 1,
        pages,
        total,
        if total == 1 { "" } else { "s" }
    );
    for row in controller.rows() {
        println!("{}", render(row));
    }
    Ok(())
}

// ==================== Demo data ====================

fn demo_accounts() -> Vec<SavingsAccount> {
    let account = |id: u64, status: AccountStatus, balance: i64, opened: (i32, u32, u32)| {
        SavingsAccount {
            id,
            account_number: format!("SAV-2024-{:05}", id),
            account_type: "REGULAR".to_string(),
            balance: Decimal::new(balance, 0),
            status,
            interest_rate: Decimal::new(75, 1),
            date_opened: NaiveDate::from_ymd_opt(opened.0, opened.1, opened.2)
                .unwrap_or_default(),
        }
    };
    vec![
        account(1, AccountStatus::Active, 1_250_000, (2024, 1, 15)),
        account(2, AccountStatus::Active, 480_000, (2024, 2, 3)),
        account(3, AccountStatus::Dormant, 12_500, (2023, 6, 20)),
        account(4, AccountStatus::Active, 3_600_000, (2024, 4, 8)),
        account(5, AccountStatus::Closed, 0, (2022, 11, 30)),
    ]
}

fn demo_transactions() -> Vec<LedgerTransaction> {
    let tx = |id: u64,
              kind: TransactionType,
              status: TransactionStatus,
              amount: i64,
              day: u32| LedgerTransaction {
        id,
        transaction_ref: format!("TXN-2024-{:06}", id),
        transaction_type: kind,
        amount: Decimal::new(amount, 0),
        payment_method: "MOBILE_MONEY".to_string(),
        status,
        created_at: Utc
            .with_ymd_and_hms(2024, 6, day, 10, 30, 0)
            .single()
            .unwrap_or_default(),
    };
    vec![
        tx(1, TransactionType::Deposit, TransactionStatus::Completed, 200_000, 1),
        tx(2, TransactionType::Withdrawal, TransactionStatus::Completed, 50_000, 2),
        tx(3, TransactionType::Deposit, TransactionStatus::Pending, 75_000, 3),
        tx(4, TransactionType::LoanDisbursement, TransactionStatus::Completed, 1_500_000, 5),
        tx(5, TransactionType::LoanRepayment, TransactionStatus::Failed, 125_000, 8),
        tx(6, TransactionType::Deposit, TransactionStatus::Completed, 310_000, 9),
    ]
}
