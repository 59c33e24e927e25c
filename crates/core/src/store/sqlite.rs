use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::rusqlite::{self, params_from_iter, types::Value};
use tokio_rusqlite::{Connection, params};

use super::RecordSource;
use crate::Error;
use crate::migrations;
use crate::model::{Account, Contact, CountryCount, normalize_code};

/// [`RecordSource`] over a SQLite database with `contacts` and `accounts` tables.
#[derive(Clone, Debug)]
pub struct SqliteRecordStore {
    pub(crate) conn: Connection,
}

fn store_error(err: tokio_rusqlite::Error<rusqlite::Error>) -> Error {
    Error::StoreQuery(err.to_string())
}

/// SQLite `LIMIT` treats negative values as unbounded, so refuse anything past `i64::MAX`.
fn sql_limit(limit: usize) -> Result<i64, Error> {
    i64::try_from(limit).map_err(|_| Error::InvalidInput(format!("limit {limit} is too large")))
}

/// `?1, ?2, ...` for `n` positional parameters.
fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

impl SqliteRecordStore {
    /// Open the store at `path`, creating the record tables if absent.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conn = Connection::open(path).await.map_err(|e| store_error(e.into()))?;
        Self::init(conn).await
    }

    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory().await.map_err(|e| store_error(e.into()))?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, Error> {
        migrations::apply(&conn, migrations::RECORDS)
            .await
            .map_err(|e| Error::StoreQuery(e.to_string()))?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl RecordSource for SqliteRecordStore {
    async fn find_contacts(&self, limit: usize) -> Result<Vec<Contact>, Error> {
        let limit = sql_limit(limit)?;
        self.conn
            .call(move |conn| -> rusqlite::Result<Vec<Contact>> {
                let mut stmt = conn.prepare(
                    "SELECT id, name, email, mailing_street, mailing_city, mailing_state
                    FROM contacts ORDER BY id LIMIT ?1",
                )?;
                let rows = stmt.query_map(params![limit], |row| {
                    Ok(Contact {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        mailing_street: row.get(3)?,
                        mailing_city: row.get(4)?,
                        mailing_state: row.get(5)?,
                    })
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await
            .map_err(store_error)
    }

    async fn find_accounts(&self, countries: &[String], limit: usize) -> Result<Vec<Account>, Error> {
        if countries.is_empty() {
            return Ok(Vec::new());
        }

        let limit = sql_limit(limit)?;
        let sql = format!(
            "SELECT id, billing_city, billing_country FROM accounts
            WHERE UPPER(TRIM(billing_country)) IN ({}) ORDER BY id LIMIT ?{}",
            placeholders(countries.len()),
            countries.len() + 1
        );
        let mut values: Vec<Value> = countries.iter().map(|c| Value::Text(normalize_code(c))).collect();
        values.push(Value::Integer(limit));

        self.conn
            .call(move |conn| -> rusqlite::Result<Vec<Account>> {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
                    Ok(Account { id: row.get(0)?, billing_city: row.get(1)?, billing_country: row.get(2)? })
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await
            .map_err(store_error)
    }

    async fn count_accounts_by_country(&self, codes: &[String]) -> Result<Vec<CountryCount>, Error> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT UPPER(TRIM(billing_country)) AS country, COUNT(*) AS count FROM accounts
            WHERE UPPER(TRIM(billing_country)) IN ({})
            GROUP BY UPPER(TRIM(billing_country))",
            placeholders(codes.len())
        );
        let values: Vec<Value> = codes.iter().map(|c| Value::Text(normalize_code(c))).collect();

        self.conn
            .call(move |conn| -> rusqlite::Result<Vec<CountryCount>> {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
                    Ok(CountryCount { country: row.get(0)?, count: row.get(1)? })
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await
            .map_err(store_error)
    }

    async fn update_billing_country(&self, from: &str, to: &str) -> Result<u64, Error> {
        let from = normalize_code(from);
        let to = normalize_code(to);
        self.conn
            .call(move |conn| -> rusqlite::Result<u64> {
                let changed = conn.execute(
                    "UPDATE accounts SET billing_country = ?1 WHERE UPPER(TRIM(billing_country)) = ?2",
                    params![to, from],
                )?;
                Ok(changed as u64)
            })
            .await
            .map_err(|e| Error::CorrectionFailed(e.to_string()))
    }
}
