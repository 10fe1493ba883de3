//! JSON document loading and saving for configuration and expenses
//!
//! Expense lists are stored either as an ordered array of items, or in the
//! split form older installs wrote: one object mapping name to monthly amount
//! and a second object mapping name to annual growth.

use super::{Config, ExpenseItem, ExpenseList};
use crate::error::{StoreError, ValidationError};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Load and validate a configuration document
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, StoreError> {
    let file = File::open(path)?;
    let config: Config = serde_json::from_reader(BufReader::new(file))?;
    config.validate()?;
    Ok(config)
}

/// Load a configuration document, falling back to defaults when the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!("{} not found, using default configuration", path.display());
        return Ok(Config::default());
    }
    load_config(path)
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), StoreError> {
    write_pretty(config, path.as_ref())
}

/// Load an expense document in either array form or legacy amount-map form
///
/// An amount map on its own carries no growth, so every item gets 0% growth.
pub fn load_expenses<P: AsRef<Path>>(path: P) -> Result<ExpenseList, StoreError> {
    let value = read_value(path.as_ref())?;
    match value {
        Value::Object(amounts) => expenses_from_maps(&amounts, &Map::new()),
        other => {
            let items: Vec<ExpenseItem> = serde_json::from_value(other)?;
            Ok(ExpenseList::from_items(items)?)
        }
    }
}

/// Load the split form: an amounts document plus an optional growth document
pub fn load_split_expenses<P, Q>(amounts_path: P, growth_path: Option<Q>) -> Result<ExpenseList, StoreError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let amounts = read_object(amounts_path.as_ref())?;
    let growth = match growth_path {
        Some(path) if path.as_ref().exists() => read_object(path.as_ref())?,
        Some(path) => {
            log::info!("{} not found, assuming zero growth", path.as_ref().display());
            Map::new()
        }
        None => Map::new(),
    };
    Ok(expenses_from_maps(&amounts, &growth)?)
}

pub fn save_expenses<P: AsRef<Path>>(expenses: &ExpenseList, path: P) -> Result<(), StoreError> {
    write_pretty(expenses, path.as_ref())
}

/// Save in the split form, one document for amounts and one for growth rates
pub fn save_split_expenses<P, Q>(expenses: &ExpenseList, amounts_path: P, growth_path: Q) -> Result<(), StoreError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut amounts = Map::new();
    let mut growth = Map::new();
    for item in expenses {
        amounts.insert(item.name.clone(), Value::from(item.monthly_base_amount));
        growth.insert(item.name.clone(), Value::from(item.annual_growth_rate));
    }
    write_pretty(&amounts, amounts_path.as_ref())?;
    write_pretty(&growth, growth_path.as_ref())
}

/// Combine the name→amount and name→growth maps, keeping the amount map's key order.
/// Growth entries for names absent from the amounts are ignored.
fn expenses_from_maps(amounts: &Map<String, Value>, growth: &Map<String, Value>) -> Result<ExpenseList, StoreError> {
    let mut list = ExpenseList::new();
    for (name, amount) in amounts {
        let amount = number_field(name, amount)?;
        let rate = match growth.get(name) {
            Some(value) => number_field(name, value)?,
            None => 0.0,
        };
        list.add(ExpenseItem::new(name.clone(), amount, rate))?;
    }
    Ok(list)
}

fn number_field(name: &str, value: &Value) -> Result<f64, StoreError> {
    value
        .as_f64()
        .ok_or_else(|| ValidationError::NonFinite { field: name.to_string() }.into())
}

fn read_value(path: &Path) -> Result<Value, StoreError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn read_object(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn write_pretty<T: serde::Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
