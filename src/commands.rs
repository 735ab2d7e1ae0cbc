//! Command handlers for the interactive symbol table.
//!
//! Each handler takes the table it operates on and returns the text to show
//! the user. Blank symbols are passed to the table as absent keys, so they
//! come back as [`TableError::InvalidArgument`].

use crate::error::TableError;
use crate::hash_table::HashTable;
use core::fmt::Write as _;

pub type SymbolTable = HashTable<String, i64>;

pub const MENU: &str = "\
Select operation:
1. Insert a symbol
2. Lookup a symbol
3. Delete a symbol
4. Print all symbols
5. Clear the table
6. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Insert,
    Lookup,
    Delete,
    List,
    Clear,
    Exit,
}

impl MenuChoice {
    /// Parses the number typed at the menu prompt.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(MenuChoice::Insert),
            2 => Some(MenuChoice::Lookup),
            3 => Some(MenuChoice::Delete),
            4 => Some(MenuChoice::List),
            5 => Some(MenuChoice::Clear),
            6 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn symbol_arg(raw: &str) -> Option<&str> {
    let s = raw.trim();
    (!s.is_empty()).then_some(s)
}

pub fn insert(table: &mut SymbolTable, symbol: &str, value: i64) -> Result<String, TableError> {
    let symbol = symbol_arg(symbol);
    table.try_put(symbol.map(str::to_owned), value)?;
    let symbol = symbol.unwrap_or_default();
    Ok(format!("Symbol '{symbol}' inserted with value {value}"))
}

pub fn lookup(table: &SymbolTable, symbol: &str) -> Result<String, TableError> {
    let symbol = symbol_arg(symbol);
    let found = table.try_get(symbol)?.copied();
    let symbol = symbol.unwrap_or_default();
    Ok(match found {
        Some(v) => format!("Value associated with '{symbol}': {v}"),
        None => format!("Symbol '{symbol}' not found."),
    })
}

pub fn delete(table: &mut SymbolTable, symbol: &str) -> Result<String, TableError> {
    let symbol = symbol_arg(symbol);
    table.try_delete(symbol)?;
    let symbol = symbol.unwrap_or_default();
    Ok(format!("Symbol '{symbol}' deleted."))
}

/// One `symbol: value` line per entry, after a header line.
pub fn list(table: &SymbolTable) -> String {
    let mut out = String::from("Symbols in symbol table:");
    for key in table.keys() {
        if let Some(v) = table.get(key) {
            let _ = write!(out, "\n{key}: {v}");
        }
    }
    out
}

pub fn clear(table: &mut SymbolTable) -> String {
    table.clear();
    "Table cleared.".to_string()
}
