use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::database::models::balance_sheet::{is_line_item_column, BalanceSheet};
use crate::database::models::Company;
use crate::error::ApiError;

/// A company together with its balance sheet records, as returned by the
/// companies listing.
#[derive(Debug, Serialize)]
pub struct CompanyWithBalanceSheets {
    pub company: Company,
    pub balance_sheets: Vec<BalanceSheet>,
}

pub async fn find(
    pool: &PgPool,
    ticker: &str,
    year: i32,
) -> Result<Option<BalanceSheet>, ApiError> {
    let sheet = sqlx::query_as::<_, BalanceSheet>(
        "SELECT * FROM balance_sheets WHERE ticker = $1 AND year = $2",
    )
    .bind(ticker)
    .bind(year)
    .fetch_optional(pool)
    .await?;
    Ok(sheet)
}

pub async fn exists(pool: &PgPool, ticker: &str, year: i32) -> Result<bool, ApiError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM balance_sheets WHERE ticker = $1 AND year = $2",
    )
    .bind(ticker)
    .bind(year)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Insert a sparse record for (ticker, year). `fields` holds sanitized line
/// items; unrecognized keys are skipped. The unique index turns a lost
/// duplicate-create race into a Conflict via the sqlx error mapping.
pub async fn create(
    pool: &PgPool,
    ticker: &str,
    year: i32,
    fields: &BTreeMap<String, f64>,
) -> Result<BalanceSheet, ApiError> {
    let columns: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|k| is_line_item_column(k))
        .collect();

    let sql = build_insert_sql(&columns);
    let mut query = sqlx::query_as::<_, BalanceSheet>(&sql).bind(ticker).bind(year);
    for col in &columns {
        query = query.bind(fields[*col]);
    }

    let sheet = query.fetch_one(pool).await?;
    Ok(sheet)
}

/// Merge-patch update: only columns present in `patch` overwrite stored
/// values; an explicit null clears a value; unknown keys are ignored. Returns
/// None when no record exists for the key.
pub async fn merge_patch(
    pool: &PgPool,
    ticker: &str,
    year: i32,
    patch: &Map<String, Value>,
) -> Result<Option<BalanceSheet>, ApiError> {
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for (key, value) in patch {
        if !is_line_item_column(key) {
            continue;
        }
        match value {
            Value::Null => values.push(None),
            Value::Number(n) => values.push(Some(n.as_f64().ok_or_else(|| {
                ApiError::bad_request(format!("Field '{}' is not a representable number", key))
            })?)),
            _ => {
                return Err(ApiError::bad_request(format!(
                    "Field '{}' must be a number or null",
                    key
                )))
            }
        }
        columns.push(key.as_str());
    }

    // A patch that names no known columns changes nothing.
    if columns.is_empty() {
        return find(pool, ticker, year).await;
    }

    let sql = build_update_sql(&columns);
    let mut query = sqlx::query_as::<_, BalanceSheet>(&sql).bind(ticker).bind(year);
    for value in values {
        query = query.bind(value);
    }

    let sheet = query.fetch_optional(pool).await?;
    Ok(sheet)
}

/// Delete the record for (ticker, year); false when nothing was there.
pub async fn delete(pool: &PgPool, ticker: &str, year: i32) -> Result<bool, ApiError> {
    let result = sqlx::query("DELETE FROM balance_sheets WHERE ticker = $1 AND year = $2")
        .bind(ticker)
        .bind(year)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Look the company up by ticker, creating it when unseen. Company creation
/// and the subsequent balance-sheet insert are separate statements; a crash
/// between them leaves a company without sheets, which is acceptable.
pub async fn ensure_company(pool: &PgPool, ticker: &str) -> Result<Company, ApiError> {
    let existing = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE name = $1")
        .bind(ticker)
        .fetch_optional(pool)
        .await?;
    if let Some(company) = existing {
        return Ok(company);
    }

    let inserted = sqlx::query_as::<_, Company>(
        "INSERT INTO companies (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING *",
    )
    .bind(ticker)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(company) => Ok(company),
        // Lost a create race; the row is there now.
        None => sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE name = $1")
            .bind(ticker)
            .fetch_one(pool)
            .await
            .map_err(ApiError::from),
    }
}

/// Every company with its nested balance sheets.
pub async fn list_companies_with_sheets(
    pool: &PgPool,
) -> Result<Vec<CompanyWithBalanceSheets>, ApiError> {
    let companies = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name")
        .fetch_all(pool)
        .await?;

    let mut out = Vec::with_capacity(companies.len());
    for company in companies {
        let balance_sheets = sqlx::query_as::<_, BalanceSheet>(
            "SELECT * FROM balance_sheets WHERE ticker = $1 ORDER BY year",
        )
        .bind(&company.name)
        .fetch_all(pool)
        .await?;

        out.push(CompanyWithBalanceSheets {
            company,
            balance_sheets,
        });
    }
    Ok(out)
}

/// Pull the numeric line items out of a JSON request body for a direct
/// create. Unknown keys and nulls are skipped; non-numeric values for known
/// columns are rejected.
pub fn numeric_fields_from_body(body: &Map<String, Value>) -> Result<BTreeMap<String, f64>, ApiError> {
    let mut fields = BTreeMap::new();
    for (key, value) in body {
        if !is_line_item_column(key) {
            continue;
        }
        match value {
            Value::Null => {}
            Value::Number(n) => {
                if let Some(v) = n.as_f64() {
                    fields.insert(key.clone(), v);
                }
            }
            _ => {
                return Err(ApiError::bad_request(format!(
                    "Field '{}' must be a number or null",
                    key
                )))
            }
        }
    }
    Ok(fields)
}

// Column names are always drawn from LINE_ITEM_COLUMNS, never from request
// input, so interpolating them is safe.
fn build_insert_sql(columns: &[&str]) -> String {
    let mut col_list = String::from("ticker, year");
    let mut placeholders = String::from("$1, $2");
    for (i, col) in columns.iter().enumerate() {
        col_list.push_str(", ");
        col_list.push_str(col);
        placeholders.push_str(&format!(", ${}", i + 3));
    }
    format!(
        "INSERT INTO balance_sheets ({}) VALUES ({}) RETURNING *",
        col_list, placeholders
    )
}

fn build_update_sql(columns: &[&str]) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ${}", col, i + 3))
        .collect();
    format!(
        "UPDATE balance_sheets SET {} WHERE ticker = $1 AND year = $2 RETURNING *",
        assignments.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_sql_places_key_first_and_numbers_placeholders() {
        let sql = build_insert_sql(&["total_assets", "total_debt"]);
        assert_eq!(
            sql,
            "INSERT INTO balance_sheets (ticker, year, total_assets, total_debt) \
             VALUES ($1, $2, $3, $4) RETURNING *"
        );
    }

    #[test]
    fn update_sql_keys_on_ticker_and_year() {
        let sql = build_update_sql(&["total_assets"]);
        assert_eq!(
            sql,
            "UPDATE balance_sheets SET total_assets = $3 \
             WHERE ticker = $1 AND year = $2 RETURNING *"
        );
    }

    #[test]
    fn body_extraction_skips_unknown_keys_and_nulls() {
        let body = json!({
            "total_assets": 100.0,
            "total_liabilities_net_minority_interest": 40.0,
            "net_debt": null,
            "ticker": "AAPL",
            "made_up_field": 1.0,
        });
        let fields = numeric_fields_from_body(body.as_object().unwrap()).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["total_assets"], 100.0);
        assert_eq!(fields["total_liabilities_net_minority_interest"], 40.0);
    }

    #[test]
    fn body_extraction_rejects_non_numeric_line_items() {
        let body = json!({ "total_assets": "a lot" });
        assert!(numeric_fields_from_body(body.as_object().unwrap()).is_err());
    }
}
