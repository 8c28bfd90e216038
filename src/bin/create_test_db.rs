use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use spendlog_rs::{
    Amount, CategoryName, CurrencyCode, Transaction, count_transactions, create_transaction,
    initialize_db,
};

/// A utility for creating a test database for the REST API server of spendlog_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let samples = [
        (1000, date!(2025 - 08 - 01), "Groceries", "Food"),
        (525, date!(2025 - 08 - 02), "Lunch", "Food"),
        (2000, date!(2025 - 08 - 03), "Bus pass", "Transport"),
        (375, date!(2025 - 08 - 04), "Stationery", "Misc"),
    ];

    for (cents, date, description, category) in samples {
        create_transaction(
            Transaction::build(
                Amount::from_cents(cents),
                CurrencyCode::new_unchecked("USD"),
                date,
                CategoryName::new_unchecked(category),
            )
            .description(description),
            &conn,
        )?;
    }

    println!(
        "Success! Created {} transactions.",
        count_transactions(&conn)?
    );

    Ok(())
}
