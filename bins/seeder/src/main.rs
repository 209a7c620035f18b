//! Database seeder for Vestry development and testing.
//!
//! Seeds a church chart of accounts, the current year's fiscal
//! periods, and a handful of responsibility centers.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Utc};

use vestry_core::account::AccountType;
use vestry_db::repositories::account::{AccountRepository, CreateAccountInput};
use vestry_db::repositories::center::{CenterRepository, CreateCenterInput};
use vestry_db::repositories::fiscal::FiscalRepository;
use vestry_shared::error::AppError;
use vestry_shared::types::AccountId;

/// One account to seed: code, name, type, and optional parent code.
struct SeedAccount {
    code: &'static str,
    name: &'static str,
    account_type: AccountType,
    parent_code: Option<&'static str>,
}

const CHART_OF_ACCOUNTS: &[SeedAccount] = &[
    // Assets
    SeedAccount {
        code: "1-0000",
        name: "Assets",
        account_type: AccountType::Asset,
        parent_code: None,
    },
    SeedAccount {
        code: "1-1000",
        name: "Cash on Hand",
        account_type: AccountType::Asset,
        parent_code: Some("1-0000"),
    },
    SeedAccount {
        code: "1-1100",
        name: "Checking Account",
        account_type: AccountType::Asset,
        parent_code: Some("1-0000"),
    },
    SeedAccount {
        code: "1-2000",
        name: "Buildings",
        account_type: AccountType::Asset,
        parent_code: Some("1-0000"),
    },
    SeedAccount {
        code: "1-2100",
        name: "Office Equipment",
        account_type: AccountType::Asset,
        parent_code: Some("1-0000"),
    },
    SeedAccount {
        code: "1-2900",
        name: "Accumulated Depreciation",
        account_type: AccountType::Asset,
        parent_code: Some("1-0000"),
    },
    // Liabilities
    SeedAccount {
        code: "2-0000",
        name: "Liabilities",
        account_type: AccountType::Liability,
        parent_code: None,
    },
    SeedAccount {
        code: "2-1000",
        name: "Accounts Payable",
        account_type: AccountType::Liability,
        parent_code: Some("2-0000"),
    },
    SeedAccount {
        code: "2-2000",
        name: "Designated Funds Payable",
        account_type: AccountType::Liability,
        parent_code: Some("2-0000"),
    },
    // Equity
    SeedAccount {
        code: "3-0000",
        name: "Net Assets",
        account_type: AccountType::Equity,
        parent_code: None,
    },
    SeedAccount {
        code: "3-1000",
        name: "Retained Earnings",
        account_type: AccountType::Equity,
        parent_code: Some("3-0000"),
    },
    // Income
    SeedAccount {
        code: "4-0000",
        name: "Income",
        account_type: AccountType::Income,
        parent_code: None,
    },
    SeedAccount {
        code: "4-1000",
        name: "Tithes",
        account_type: AccountType::Income,
        parent_code: Some("4-0000"),
    },
    SeedAccount {
        code: "4-1100",
        name: "Offerings",
        account_type: AccountType::Income,
        parent_code: Some("4-0000"),
    },
    SeedAccount {
        code: "4-2000",
        name: "Missions Giving",
        account_type: AccountType::Income,
        parent_code: Some("4-0000"),
    },
    // Expenses
    SeedAccount {
        code: "5-0000",
        name: "Expenses",
        account_type: AccountType::Expense,
        parent_code: None,
    },
    SeedAccount {
        code: "5-1000",
        name: "Salaries",
        account_type: AccountType::Expense,
        parent_code: Some("5-0000"),
    },
    SeedAccount {
        code: "5-2000",
        name: "Utilities",
        account_type: AccountType::Expense,
        parent_code: Some("5-0000"),
    },
    SeedAccount {
        code: "5-3000",
        name: "Missions Support",
        account_type: AccountType::Expense,
        parent_code: Some("5-0000"),
    },
    SeedAccount {
        code: "5-4000",
        name: "Office Supplies",
        account_type: AccountType::Expense,
        parent_code: Some("5-0000"),
    },
    SeedAccount {
        code: "5-5000",
        name: "Depreciation Expense",
        account_type: AccountType::Expense,
        parent_code: Some("5-0000"),
    },
    SeedAccount {
        code: "5-6000",
        name: "Building Maintenance",
        account_type: AccountType::Expense,
        parent_code: Some("5-0000"),
    },
];

const CENTERS: &[(&str, &str)] = &[
    ("WORSHIP", "Worship Ministry"),
    ("YOUTH", "Youth Ministry"),
    ("MISSIONS", "Missions"),
    ("ADMIN", "Administration"),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = vestry_db::connect(&database_url, vestry_db::DEFAULT_MAX_CONNECTIONS)
        .await
        .expect("Failed to connect to database");

    println!("Seeding chart of accounts...");
    seed_accounts(&AccountRepository::new(db.clone())).await;

    println!("Seeding fiscal periods...");
    let year = Utc::now().year();
    FiscalRepository::new(db.clone())
        .ensure_year(year)
        .await
        .expect("Failed to seed fiscal periods");
    println!("  Periods ensured for {year}");

    println!("Seeding responsibility centers...");
    seed_centers(&CenterRepository::new(db.clone())).await;

    println!("Seeding complete!");
}

/// Seeds the chart of accounts, skipping codes that already exist.
///
/// Parents appear before their children in `CHART_OF_ACCOUNTS`, so a
/// single pass resolves every parent code.
async fn seed_accounts(repo: &AccountRepository) {
    for seed in CHART_OF_ACCOUNTS {
        let existing = repo
            .find_by_code(seed.code)
            .await
            .expect("Failed to look up account");
        if existing.is_some() {
            println!("  Account {} already exists, skipping...", seed.code);
            continue;
        }

        let parent_id = match seed.parent_code {
            Some(code) => {
                let parent = repo
                    .find_by_code(code)
                    .await
                    .expect("Failed to look up parent account")
                    .expect("Parent account must be seeded first");
                Some(AccountId::from_uuid(parent.id))
            }
            None => None,
        };

        repo.create(CreateAccountInput {
            code: seed.code.to_string(),
            name: seed.name.to_string(),
            description: None,
            account_type: seed.account_type,
            parent_id,
        })
        .await
        .expect("Failed to seed account");
        println!("  Created account {} {}", seed.code, seed.name);
    }
}

/// Seeds responsibility centers, skipping codes that already exist.
async fn seed_centers(repo: &CenterRepository) {
    for (code, name) in CENTERS {
        let result = repo
            .create(CreateCenterInput {
                code: (*code).to_string(),
                name: (*name).to_string(),
                description: None,
            })
            .await;

        match result {
            Ok(center) => println!("  Created center {}", center.code),
            Err(AppError::Conflict(_)) => {
                println!("  Center {code} already exists, skipping...");
            }
            Err(e) => panic!("Failed to seed center {code}: {e}"),
        }
    }
}
