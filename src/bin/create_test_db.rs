use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use expense_tracker::{ExpenseData, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker server.
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
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'expenses.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test expenses...");

    conn.execute(
        "INSERT INTO expenses (id, amount, title, note, tags) VALUES (?1, ?2, ?3, ?4, ?5)",
        (10, 15.0, "test-title", "test-note", r#"["test-tags"]"#),
    )?;

    let fixtures = [
        (75.0, "Halo Kitty", "buy tea and coffee", vec!["drinks", "juices"]),
        (65.0, "Ice Milk", "", vec!["drinks"]),
        (100.0, "Ice Chocolate", "", vec![]),
    ];

    for (amount, title, note, tags) in fixtures {
        let data = ExpenseData {
            amount,
            title: title.to_owned(),
            note: note.to_owned(),
            tags: tags.into_iter().map(str::to_owned).collect(),
        };

        create_expense(&data, &conn)?;
    }

    println!("Success!");

    Ok(())
}
