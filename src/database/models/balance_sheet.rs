use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One reported balance sheet: `(ticker, year)` natural key plus a flat set
/// of independently nullable line items. Rows are created sparse (only the
/// values the source reported) and updated by merge patch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BalanceSheet {
    #[serde(skip_serializing, default)]
    pub id: i32,
    pub ticker: String,
    pub year: i32,
    pub treasury_shares_number: Option<f64>,
    pub ordinary_shares_number: Option<f64>,
    pub share_issued: Option<f64>,
    pub net_debt: Option<f64>,
    pub total_debt: Option<f64>,
    pub tangible_book_value: Option<f64>,
    pub invested_capital: Option<f64>,
    pub working_capital: Option<f64>,
    pub net_tangible_assets: Option<f64>,
    pub capital_lease_obligations: Option<f64>,
    pub common_stock_equity: Option<f64>,
    pub total_capitalization: Option<f64>,
    pub total_equity_gross_minority_interest: Option<f64>,
    pub stockholders_equity: Option<f64>,
    pub gains_losses_not_affecting_retained_earnings: Option<f64>,
    pub other_equity_adjustments: Option<f64>,
    pub retained_earnings: Option<f64>,
    pub capital_stock: Option<f64>,
    pub common_stock: Option<f64>,
    pub total_liabilities_net_minority_interest: Option<f64>,
    pub total_non_current_liabilities_net_minority_interest: Option<f64>,
    pub other_non_current_liabilities: Option<f64>,
    pub trade_and_other_payables_non_current: Option<f64>,
    pub long_term_debt_and_capital_lease_obligation: Option<f64>,
    pub long_term_capital_lease_obligation: Option<f64>,
    pub long_term_debt: Option<f64>,
    pub current_liabilities: Option<f64>,
    pub other_current_liabilities: Option<f64>,
    pub current_deferred_liabilities: Option<f64>,
    pub current_deferred_revenue: Option<f64>,
    pub current_debt_and_capital_lease_obligation: Option<f64>,
    pub current_capital_lease_obligation: Option<f64>,
    pub current_debt: Option<f64>,
    pub other_current_borrowings: Option<f64>,
    pub commercial_paper: Option<f64>,
    pub payables_and_accrued_expenses: Option<f64>,
    pub payables: Option<f64>,
    pub total_tax_payable: Option<f64>,
    pub income_tax_payable: Option<f64>,
    pub accounts_payable: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_non_current_assets: Option<f64>,
    pub other_non_current_assets: Option<f64>,
    pub non_current_deferred_assets: Option<f64>,
    pub non_current_deferred_taxes_assets: Option<f64>,
    pub investments_and_advances: Option<f64>,
    pub other_investments: Option<f64>,
    pub investment_in_financial_assets: Option<f64>,
    pub available_for_sale_securities: Option<f64>,
    pub net_ppe: Option<f64>,
    pub accumulated_depreciation: Option<f64>,
    pub gross_ppe: Option<f64>,
    pub leases: Option<f64>,
    pub other_properties: Option<f64>,
    pub machinery_furniture_equipment: Option<f64>,
    pub land_and_improvements: Option<f64>,
    pub properties: Option<f64>,
    pub current_assets: Option<f64>,
    pub other_current_assets: Option<f64>,
    pub inventory: Option<f64>,
    pub receivables: Option<f64>,
    pub other_receivables: Option<f64>,
    pub accounts_receivable: Option<f64>,
    pub cash_cash_equivalents_and_short_term_investments: Option<f64>,
    pub other_short_term_investments: Option<f64>,
    pub cash_and_cash_equivalents: Option<f64>,
    pub cash_equivalents: Option<f64>,
    pub cash_financial: Option<f64>,
}

/// The numeric line-item columns, in schema order. Dynamic INSERT/UPDATE
/// statements only ever interpolate names taken from this list.
pub const LINE_ITEM_COLUMNS: &[&str] = &[
    "treasury_shares_number",
    "ordinary_shares_number",
    "share_issued",
    "net_debt",
    "total_debt",
    "tangible_book_value",
    "invested_capital",
    "working_capital",
    "net_tangible_assets",
    "capital_lease_obligations",
    "common_stock_equity",
    "total_capitalization",
    "total_equity_gross_minority_interest",
    "stockholders_equity",
    "gains_losses_not_affecting_retained_earnings",
    "other_equity_adjustments",
    "retained_earnings",
    "capital_stock",
    "common_stock",
    "total_liabilities_net_minority_interest",
    "total_non_current_liabilities_net_minority_interest",
    "other_non_current_liabilities",
    "trade_and_other_payables_non_current",
    "long_term_debt_and_capital_lease_obligation",
    "long_term_capital_lease_obligation",
    "long_term_debt",
    "current_liabilities",
    "other_current_liabilities",
    "current_deferred_liabilities",
    "current_deferred_revenue",
    "current_debt_and_capital_lease_obligation",
    "current_capital_lease_obligation",
    "current_debt",
    "other_current_borrowings",
    "commercial_paper",
    "payables_and_accrued_expenses",
    "payables",
    "total_tax_payable",
    "income_tax_payable",
    "accounts_payable",
    "total_assets",
    "total_non_current_assets",
    "other_non_current_assets",
    "non_current_deferred_assets",
    "non_current_deferred_taxes_assets",
    "investments_and_advances",
    "other_investments",
    "investment_in_financial_assets",
    "available_for_sale_securities",
    "net_ppe",
    "accumulated_depreciation",
    "gross_ppe",
    "leases",
    "other_properties",
    "machinery_furniture_equipment",
    "land_and_improvements",
    "properties",
    "current_assets",
    "other_current_assets",
    "inventory",
    "receivables",
    "other_receivables",
    "accounts_receivable",
    "cash_cash_equivalents_and_short_term_investments",
    "other_short_term_investments",
    "cash_and_cash_equivalents",
    "cash_equivalents",
    "cash_financial",
];

/// True if `name` is a known line-item column.
pub fn is_line_item_column(name: &str) -> bool {
    LINE_ITEM_COLUMNS.contains(&name)
}
