use chained_hash_table::commands::{self, MenuChoice, SymbolTable, MENU};
use chained_hash_table::{TableOptions, DEFAULT_CAPACITY};
use clap::Parser;
use std::io::{self, BufRead, Write};

/// Interactive symbol table backed by a separate-chaining hash table.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Starting bucket count.
    #[clap(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
}

/// Prints `text` and reads one line. `None` at end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, text: &str) -> io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn run(table: &mut SymbolTable, mut input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    loop {
        writeln!(out, "\n{MENU}")?;
        let Some(line) = prompt(&mut input, &mut out, "Enter your choice: ")? else {
            break;
        };
        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(out, "Invalid choice. Please enter a number between 1 and 6.")?;
            continue;
        };

        let reply = match choice {
            MenuChoice::Insert => {
                let Some(symbol) = prompt(&mut input, &mut out, "Enter symbol (key): ")? else {
                    break;
                };
                let Some(raw) = prompt(&mut input, &mut out, "Enter value: ")? else {
                    break;
                };
                match raw.trim().parse::<i64>() {
                    Ok(value) => commands::insert(table, &symbol, value),
                    Err(e) => {
                        writeln!(out, "Invalid value '{}': {e}", raw.trim())?;
                        continue;
                    }
                }
            }
            MenuChoice::Lookup => {
                let Some(symbol) = prompt(&mut input, &mut out, "Enter symbol (key) to lookup: ")?
                else {
                    break;
                };
                commands::lookup(table, &symbol)
            }
            MenuChoice::Delete => {
                let Some(symbol) = prompt(&mut input, &mut out, "Enter symbol (key) to delete: ")?
                else {
                    break;
                };
                commands::delete(table, &symbol)
            }
            MenuChoice::List => Ok(commands::list(table)),
            MenuChoice::Clear => Ok(commands::clear(table)),
            MenuChoice::Exit => break,
        };

        match reply {
            Ok(text) => writeln!(out, "{text}")?,
            Err(e) => {
                log::warn!("rejected command {:?}: {}", choice, e);
                writeln!(out, "Error: {e}")?;
            }
        }
    }
    writeln!(out, "Exiting program.")?;
    Ok(())
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut table =
        SymbolTable::with_options(TableOptions::new().with_initial_capacity(args.capacity));
    log::info!("symbol table ready with {} buckets", table.capacity());

    let stdin = io::stdin();
    run(&mut table, stdin.lock(), io::stdout().lock())
}
