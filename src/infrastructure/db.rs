//! Database connection and schema migrations.
//!
//! Migrations are an ordered chain: every step names the step it builds on,
//! and applied steps are recorded in `schema_migrations`.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
    TransactionTrait,
};

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub depends_on: Option<&'static str>,
    pub statements: &'static [&'static str],
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "0001_initial",
        depends_on: None,
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS addresses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                street TEXT NOT NULL,
                number TEXT NOT NULL,
                city TEXT NOT NULL,
                country TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                address_id INTEGER NOT NULL,
                FOREIGN KEY (address_id) REFERENCES addresses(id) ON DELETE RESTRICT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS vendors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                company_name TEXT NOT NULL,
                address_id INTEGER NOT NULL,
                FOREIGN KEY (address_id) REFERENCES addresses(id) ON DELETE RESTRICT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS invoices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                invoice_number INTEGER NOT NULL,
                date TEXT NOT NULL,
                vendor_id INTEGER NOT NULL,
                customer_id INTEGER NOT NULL,
                FOREIGN KEY (vendor_id) REFERENCES vendors(id) ON DELETE RESTRICT,
                FOREIGN KEY (customer_id) REFERENCES customers(id) ON DELETE RESTRICT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS invoice_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                invoice_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                quantity INTEGER NOT NULL,
                price REAL NOT NULL,
                tax REAL NOT NULL,
                FOREIGN KEY (invoice_id) REFERENCES invoices(id) ON DELETE CASCADE
            )
            "#,
        ],
    },
    Migration {
        name: "0002_bank_accounts",
        depends_on: Some("0001_initial"),
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS bank_accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                vendor_id INTEGER NOT NULL,
                bank_name TEXT NOT NULL,
                iban TEXT NOT NULL,
                bic TEXT NOT NULL,
                FOREIGN KEY (vendor_id) REFERENCES vendors(id) ON DELETE CASCADE
            )
            "#],
    },
    Migration {
        name: "0003_invoice_number_per_vendor",
        depends_on: Some("0002_bank_accounts"),
        statements: &[r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_invoices_vendor_number
            ON invoices (vendor_id, invoice_number)
            "#],
    },
    // SQLite has no fixed-point storage class. The declared precision documents
    // the column; values are rounded to cents here and sea-orm maps them to Decimal.
    Migration {
        name: "0004_invoice_item_price_decimal",
        depends_on: Some("0003_invoice_number_per_vendor"),
        statements: &[
            r#"
            CREATE TABLE invoice_items_new (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                invoice_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                quantity INTEGER NOT NULL CHECK (quantity >= 0),
                price REAL(19, 2) NOT NULL CHECK (price BETWEEN -1000000 AND 1000000),
                tax REAL NOT NULL CHECK (tax BETWEEN 0 AND 1),
                FOREIGN KEY (invoice_id) REFERENCES invoices(id) ON DELETE CASCADE
            )
            "#,
            r#"
            INSERT INTO invoice_items_new (id, invoice_id, name, description, quantity, price, tax)
            SELECT id, invoice_id, name, description, quantity, ROUND(price, 2), tax
            FROM invoice_items
            "#,
            "DROP TABLE invoice_items",
            "ALTER TABLE invoice_items_new RENAME TO invoice_items",
            r#"
            CREATE INDEX IF NOT EXISTS idx_invoice_items_invoice
            ON invoice_items (invoice_id)
            "#,
        ],
    },
];

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    // Each connection to an in-memory database would see its own empty schema
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON".to_owned(),
    ))
    .await?;

    run_migrations(&db).await?;

    Ok(db)
}

/// Checks that every step builds on the one registered before it.
pub fn verify_chain(migrations: &[Migration]) -> Result<(), DbErr> {
    let mut previous: Option<&'static str> = None;
    for migration in migrations {
        if migration.depends_on != previous {
            return Err(DbErr::Migration(format!(
                "migration {} depends on {:?}, expected {:?}",
                migration.name, migration.depends_on, previous
            )));
        }
        previous = Some(migration.name);
    }
    Ok(())
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    verify_chain(MIGRATIONS)?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    let applied = applied_migrations(db).await?;

    for migration in MIGRATIONS {
        if applied.iter().any(|name| name == migration.name) {
            continue;
        }

        tracing::info!("Applying migration {}", migration.name);
        let txn = db.begin().await?;
        for sql in migration.statements {
            txn.execute(Statement::from_string(
                txn.get_database_backend(),
                sql.to_string(),
            ))
            .await?;
        }
        txn.execute(Statement::from_sql_and_values(
            txn.get_database_backend(),
            "INSERT INTO schema_migrations (name, applied_at) VALUES (?, ?)",
            [
                migration.name.into(),
                chrono::Utc::now().to_rfc3339().into(),
            ],
        ))
        .await?;
        txn.commit().await?;
    }

    Ok(())
}

/// Names of the applied migrations, in the order they ran.
pub async fn applied_migrations(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    let rows = db
        .query_all(Statement::from_string(
            db.get_database_backend(),
            "SELECT name FROM schema_migrations ORDER BY rowid".to_owned(),
        ))
        .await?;

    rows.iter()
        .map(|row| row.try_get::<String>("", "name"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_chain_is_consistent() {
        assert!(verify_chain(MIGRATIONS).is_ok());
    }

    #[test]
    fn broken_chain_is_rejected() {
        let broken = [
            Migration {
                name: "0001_a",
                depends_on: None,
                statements: &[],
            },
            Migration {
                name: "0002_b",
                depends_on: Some("0000_missing"),
                statements: &[],
            },
        ];
        assert!(verify_chain(&broken).is_err());
    }

    #[tokio::test]
    async fn migrations_are_recorded_once() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        run_migrations(&db).await.expect("Second run failed");

        let applied = applied_migrations(&db).await.expect("Query failed");
        let expected: Vec<String> = MIGRATIONS.iter().map(|m| m.name.to_string()).collect();
        assert_eq!(applied, expected);
    }
}
