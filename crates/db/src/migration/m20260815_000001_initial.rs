//! Initial database migration.
//!
//! Creates all enums, tables, and indexes for the accounting schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(RESPONSIBILITY_CENTERS_SQL).await?;

        // ============================================================
        // PART 3: FISCAL PERIODS
        // ============================================================
        db.execute_unprepared(FISCAL_PERIODS_SQL).await?;

        // ============================================================
        // PART 4: JOURNALS
        // ============================================================
        db.execute_unprepared(JOURNALS_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;

        // ============================================================
        // PART 5: BUDGETS
        // ============================================================
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(BUDGET_LINES_SQL).await?;

        // ============================================================
        // PART 6: FIXED ASSETS & DEPRECIATION
        // ============================================================
        db.execute_unprepared(FIXED_ASSETS_SQL).await?;
        db.execute_unprepared(DEPRECIATION_ENTRIES_SQL).await?;

        // ============================================================
        // PART 7: YEAR-END CLOSING
        // ============================================================
        db.execute_unprepared(YEAR_END_CLOSINGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account types (normal balance is derived from the type in code)
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'income',
    'expense'
);

-- Journal lifecycle
CREATE TYPE journal_status AS ENUM ('draft', 'approved');

-- Journal classification
CREATE TYPE journal_type AS ENUM (
    'general',
    'quick_giving',
    'quick_expense',
    'depreciation',
    'closing',
    'beginning_balance',
    'reversal'
);

-- Fiscal period lifecycle
CREATE TYPE fiscal_period_status AS ENUM ('open', 'closed', 'locked');

-- Budget lifecycle
CREATE TYPE budget_status AS ENUM ('draft', 'active');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    account_type account_type NOT NULL,
    parent_id UUID REFERENCES accounts(id),
    level SMALLINT NOT NULL DEFAULT 1,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_type ON accounts(account_type);
CREATE INDEX idx_accounts_parent ON accounts(parent_id) WHERE parent_id IS NOT NULL;
";

const RESPONSIBILITY_CENTERS_SQL: &str = r"
CREATE TABLE responsibility_centers (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const FISCAL_PERIODS_SQL: &str = r"
CREATE TABLE fiscal_periods (
    id UUID PRIMARY KEY,
    year INTEGER NOT NULL,
    month SMALLINT NOT NULL CHECK (month BETWEEN 1 AND 12),
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    status fiscal_period_status NOT NULL DEFAULT 'open',
    closed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (year, month)
);

CREATE INDEX idx_fiscal_periods_year ON fiscal_periods(year);
";

const JOURNALS_SQL: &str = r"
CREATE TABLE journals (
    id UUID PRIMARY KEY,
    journal_number VARCHAR(20) NOT NULL UNIQUE,
    journal_date DATE NOT NULL,
    description TEXT NOT NULL,
    journal_type journal_type NOT NULL,
    status journal_status NOT NULL DEFAULT 'draft',
    fiscal_period_id UUID NOT NULL REFERENCES fiscal_periods(id),
    total_debit NUMERIC(18, 2) NOT NULL,
    total_credit NUMERIC(18, 2) NOT NULL,
    reversed_by UUID REFERENCES journals(id),
    reverses UUID REFERENCES journals(id),
    approved_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (total_debit = total_credit)
);

CREATE INDEX idx_journals_date ON journals(journal_date);
CREATE INDEX idx_journals_period ON journals(fiscal_period_id);
CREATE INDEX idx_journals_status ON journals(status);
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY,
    journal_id UUID NOT NULL REFERENCES journals(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    line_number SMALLINT NOT NULL,
    description TEXT,
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0 CHECK (debit >= 0),
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0 CHECK (credit >= 0),
    responsibility_center_id UUID REFERENCES responsibility_centers(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (NOT (debit > 0 AND credit > 0)),
    CHECK (debit > 0 OR credit > 0)
);

CREATE INDEX idx_journal_lines_journal ON journal_lines(journal_id);
CREATE INDEX idx_journal_lines_account ON journal_lines(account_id);
CREATE INDEX idx_journal_lines_center ON journal_lines(responsibility_center_id)
    WHERE responsibility_center_id IS NOT NULL;
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id UUID PRIMARY KEY,
    fiscal_year INTEGER NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    status budget_status NOT NULL DEFAULT 'draft',
    activated_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const BUDGET_LINES_SQL: &str = r"
CREATE TABLE budget_lines (
    id UUID PRIMARY KEY,
    budget_id UUID NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    annual_amount NUMERIC(18, 2) NOT NULL CHECK (annual_amount >= 0),
    monthly_amounts JSONB NOT NULL,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (budget_id, account_id)
);
";

const FIXED_ASSETS_SQL: &str = r"
CREATE TABLE fixed_assets (
    id UUID PRIMARY KEY,
    asset_code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    acquisition_date DATE NOT NULL,
    acquisition_cost NUMERIC(18, 2) NOT NULL CHECK (acquisition_cost >= 0),
    salvage_value NUMERIC(18, 2) NOT NULL DEFAULT 0 CHECK (salvage_value >= 0),
    useful_life_months INTEGER NOT NULL CHECK (useful_life_months >= 1),
    asset_account_id UUID NOT NULL REFERENCES accounts(id),
    expense_account_id UUID NOT NULL REFERENCES accounts(id),
    accumulated_account_id UUID NOT NULL REFERENCES accounts(id),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (salvage_value <= acquisition_cost)
);
";

const DEPRECIATION_ENTRIES_SQL: &str = r"
CREATE TABLE depreciation_entries (
    id UUID PRIMARY KEY,
    asset_id UUID NOT NULL REFERENCES fixed_assets(id) ON DELETE CASCADE,
    month SMALLINT NOT NULL CHECK (month BETWEEN 1 AND 12),
    year INTEGER NOT NULL,
    amount NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    book_value_after NUMERIC(18, 2) NOT NULL CHECK (book_value_after >= 0),
    journal_id UUID NOT NULL REFERENCES journals(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Idempotency guard: one entry per asset per month
    UNIQUE (asset_id, month, year)
);

CREATE INDEX idx_depreciation_entries_asset ON depreciation_entries(asset_id);
";

const YEAR_END_CLOSINGS_SQL: &str = r"
CREATE TABLE year_end_closings (
    id UUID PRIMARY KEY,
    fiscal_year INTEGER NOT NULL UNIQUE,
    total_income NUMERIC(18, 2) NOT NULL,
    total_expense NUMERIC(18, 2) NOT NULL,
    net_income NUMERIC(18, 2) NOT NULL,
    journal_id UUID REFERENCES journals(id),
    closed_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS year_end_closings CASCADE;
DROP TABLE IF EXISTS depreciation_entries CASCADE;
DROP TABLE IF EXISTS fixed_assets CASCADE;
DROP TABLE IF EXISTS budget_lines CASCADE;
DROP TABLE IF EXISTS budgets CASCADE;
DROP TABLE IF EXISTS journal_lines CASCADE;
DROP TABLE IF EXISTS journals CASCADE;
DROP TABLE IF EXISTS fiscal_periods CASCADE;
DROP TABLE IF EXISTS responsibility_centers CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;

DROP TYPE IF EXISTS budget_status;
DROP TYPE IF EXISTS fiscal_period_status;
DROP TYPE IF EXISTS journal_type;
DROP TYPE IF EXISTS journal_status;
DROP TYPE IF EXISTS account_type;
";
