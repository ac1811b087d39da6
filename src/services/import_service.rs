use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::services::market_data::{AnnualStatement, MarketDataClient};
use crate::services::sanitize::sanitize_numeric_fields;
use crate::state::AppState;

/// Fixed lookup table from the market-data source's display labels to our
/// column names. Labels the source adds beyond this table are ignored.
pub const FIELD_MAP: &[(&str, &str)] = &[
    ("Treasury Shares Number", "treasury_shares_number"),
    ("Ordinary Shares Number", "ordinary_shares_number"),
    ("Share Issued", "share_issued"),
    ("Net Debt", "net_debt"),
    ("Total Debt", "total_debt"),
    ("Tangible Book Value", "tangible_book_value"),
    ("Invested Capital", "invested_capital"),
    ("Working Capital", "working_capital"),
    ("Net Tangible Assets", "net_tangible_assets"),
    ("Capital Lease Obligations", "capital_lease_obligations"),
    ("Common Stock Equity", "common_stock_equity"),
    ("Total Capitalization", "total_capitalization"),
    ("Total Equity Gross Minority Interest", "total_equity_gross_minority_interest"),
    ("Stockholders Equity", "stockholders_equity"),
    ("Gains Losses Not Affecting Retained Earnings", "gains_losses_not_affecting_retained_earnings"),
    ("Other Equity Adjustments", "other_equity_adjustments"),
    ("Retained Earnings", "retained_earnings"),
    ("Capital Stock", "capital_stock"),
    ("Common Stock", "common_stock"),
    ("Total Liabilities Net Minority Interest", "total_liabilities_net_minority_interest"),
    ("Total Non Current Liabilities Net Minority Interest", "total_non_current_liabilities_net_minority_interest"),
    ("Other Non Current Liabilities", "other_non_current_liabilities"),
    ("Trade And Other Payables Non Current", "trade_and_other_payables_non_current"),
    ("Long Term Debt And Capital Lease Obligation", "long_term_debt_and_capital_lease_obligation"),
    ("Long Term Capital Lease Obligation", "long_term_capital_lease_obligation"),
    ("Long Term Debt", "long_term_debt"),
    ("Current Liabilities", "current_liabilities"),
    ("Other Current Liabilities", "other_current_liabilities"),
    ("Current Deferred Liabilities", "current_deferred_liabilities"),
    ("Current Deferred Revenue", "current_deferred_revenue"),
    ("Current Debt And Capital Lease Obligation", "current_debt_and_capital_lease_obligation"),
    ("Current Capital Lease Obligation", "current_capital_lease_obligation"),
    ("Current Debt", "current_debt"),
    ("Other Current Borrowings", "other_current_borrowings"),
    ("Commercial Paper", "commercial_paper"),
    ("Payables And Accrued Expenses", "payables_and_accrued_expenses"),
    ("Payables", "payables"),
    ("Total Tax Payable", "total_tax_payable"),
    ("Income Tax Payable", "income_tax_payable"),
    ("Accounts Payable", "accounts_payable"),
    ("Total Assets", "total_assets"),
    ("Total Non Current Assets", "total_non_current_assets"),
    ("Other Non Current Assets", "other_non_current_assets"),
    ("Non Current Deferred Assets", "non_current_deferred_assets"),
    ("Non Current Deferred Taxes Assets", "non_current_deferred_taxes_assets"),
    ("Investments And Advances", "investments_and_advances"),
    ("Other Investments", "other_investments"),
    ("Investment In Financial Assets", "investment_in_financial_assets"),
    ("Available For Sale Securities", "available_for_sale_securities"),
    ("Net PPE", "net_ppe"),
    ("Accumulated Depreciation", "accumulated_depreciation"),
    ("Gross PPE", "gross_ppe"),
    ("Leases", "leases"),
    ("Other Properties", "other_properties"),
    ("Machinery Furniture Equipment", "machinery_furniture_equipment"),
    ("Land And Improvements", "land_and_improvements"),
    ("Properties", "properties"),
    ("Current Assets", "current_assets"),
    ("Other Current Assets", "other_current_assets"),
    ("Inventory", "inventory"),
    ("Receivables", "receivables"),
    ("Other Receivables", "other_receivables"),
    ("Accounts Receivable", "accounts_receivable"),
    ("Cash Cash Equivalents And Short Term Investments", "cash_cash_equivalents_and_short_term_investments"),
    ("Other Short Term Investments", "other_short_term_investments"),
    ("Cash And Cash Equivalents", "cash_and_cash_equivalents"),
    ("Cash Equivalents", "cash_equivalents"),
    ("Cash Financial", "cash_financial"),
];

/// Fetch the ticker's statements, select the one matching `year`, and reduce
/// it to sanitized column/value pairs ready for insertion. Fails NotFound
/// when the source has no data at all or none for the requested year.
pub async fn fetch_line_items(
    state: &AppState,
    ticker: &str,
    year: i32,
) -> Result<BTreeMap<String, f64>, ApiError> {
    let client = MarketDataClient::new(&state.http, &state.config.market_data.base_url);
    let statements = client.balance_sheet_series(ticker).await?;

    if statements.is_empty() {
        return Err(ApiError::not_found(
            "No balance sheet data found for the given ticker",
        ));
    }

    let statement = statements
        .iter()
        .find(|s| s.year() == Some(year))
        .ok_or_else(|| {
            ApiError::not_found("No balance sheet data found for the given year")
        })?;

    Ok(sanitize_numeric_fields(map_statement_fields(statement)))
}

/// Translate a statement's labeled figures into column/value pairs via the
/// fixed table. Unrecognized and non-numeric entries come through as None
/// and are dropped by the sanitizer.
pub fn map_statement_fields(statement: &AnnualStatement) -> Vec<(String, Option<f64>)> {
    FIELD_MAP
        .iter()
        .filter_map(|(label, column)| {
            statement
                .fields
                .get(*label)
                .map(|value| (column.to_string(), value.as_f64()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::balance_sheet::{is_line_item_column, LINE_ITEM_COLUMNS};

    #[test]
    fn field_map_covers_every_column_exactly_once() {
        assert_eq!(FIELD_MAP.len(), LINE_ITEM_COLUMNS.len());
        for (label, column) in FIELD_MAP {
            assert!(is_line_item_column(column), "unknown column {}", column);
            assert!(!label.is_empty());
        }
    }

    #[test]
    fn maps_known_labels_and_drops_nulls() {
        let statement: AnnualStatement = serde_json::from_value(serde_json::json!({
            "end_date": "2023-12-31",
            "Total Assets": 100.0,
            "Total Debt": null,
            "Net PPE": 25.5,
            "Some Unknown Label": 9.0
        }))
        .unwrap();

        let mapped = map_statement_fields(&statement);
        let clean = sanitize_numeric_fields(mapped);

        assert_eq!(clean.len(), 2);
        assert_eq!(clean["total_assets"], 100.0);
        assert_eq!(clean["net_ppe"], 25.5);
        assert!(!clean.contains_key("total_debt"));
    }
}
