//! Operating expense items and their insertion-ordered collection

use super::{require_finite, validate_growth_rate};
use crate::error::ValidationError;
use crate::projection::is_reserved_label;
use serde::{Deserialize, Serialize};

/// A recurring operating expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    /// Display name, unique within an [`ExpenseList`]
    pub name: String,

    /// Amount charged in month 0
    pub monthly_base_amount: f64,

    /// Annual growth of the amount, compounded monthly
    #[serde(default)]
    pub annual_growth_rate: f64,
}

impl ExpenseItem {
    pub fn new(name: impl Into<String>, monthly_base_amount: f64, annual_growth_rate: f64) -> Self {
        Self {
            name: name.into(),
            monthly_base_amount,
            annual_growth_rate,
        }
    }

    /// Item with no growth
    pub fn flat(name: impl Into<String>, monthly_base_amount: f64) -> Self {
        Self::new(name, monthly_base_amount, 0.0)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyExpenseName);
        }
        if is_reserved_label(&self.name) {
            return Err(ValidationError::ReservedExpenseName(self.name.clone()));
        }
        require_finite(&self.name, self.monthly_base_amount)?;
        validate_growth_rate(&self.name, self.annual_growth_rate)
    }
}

/// Expense items keyed by name, kept in insertion order
///
/// Every mutation validates the item and rejects empty or duplicate names,
/// so a list that exists is always usable by the projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ExpenseItem>", into = "Vec<ExpenseItem>")]
pub struct ExpenseList {
    items: Vec<ExpenseItem>,
}

impl ExpenseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from items, failing on the first invalid or duplicate entry
    pub fn from_items<I>(items: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = ExpenseItem>,
    {
        let mut list = Self::new();
        for item in items {
            list.add(item)?;
        }
        Ok(list)
    }

    /// Append a new item
    pub fn add(&mut self, item: ExpenseItem) -> Result<(), ValidationError> {
        item.validate()?;
        if self.contains(&item.name) {
            return Err(ValidationError::DuplicateExpenseName(item.name));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an item by name, returning it if present
    pub fn remove(&mut self, name: &str) -> Option<ExpenseItem> {
        let idx = self.position(name)?;
        Some(self.items.remove(idx))
    }

    pub fn set_amount(&mut self, name: &str, amount: f64) -> Result<(), ValidationError> {
        require_finite(name, amount)?;
        self.get_mut(name)?.monthly_base_amount = amount;
        Ok(())
    }

    pub fn set_growth(&mut self, name: &str, annual_growth_rate: f64) -> Result<(), ValidationError> {
        validate_growth_rate(name, annual_growth_rate)?;
        self.get_mut(name)?.annual_growth_rate = annual_growth_rate;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ExpenseItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseItem> {
        self.items.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Re-check every item; used when a list arrives from outside the crate
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (idx, item) in self.items.iter().enumerate() {
            item.validate()?;
            if self.items[..idx].iter().any(|prev| prev.name == item.name) {
                return Err(ValidationError::DuplicateExpenseName(item.name.clone()));
            }
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut ExpenseItem, ValidationError> {
        self.items
            .iter_mut()
            .find(|item| item.name == name)
            .ok_or_else(|| ValidationError::UnknownExpense(name.to_string()))
    }
}

impl TryFrom<Vec<ExpenseItem>> for ExpenseList {
    type Error = ValidationError;

    fn try_from(items: Vec<ExpenseItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<ExpenseList> for Vec<ExpenseItem> {
    fn from(list: ExpenseList) -> Self {
        list.items
    }
}

impl<'a> IntoIterator for &'a ExpenseList {
    type Item = &'a ExpenseItem;
    type IntoIter = std::slice::Iter<'a, ExpenseItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> ExpenseList {
        ExpenseList::from_items([
            ExpenseItem::flat("Rent", 2000.0),
            ExpenseItem::new("Payroll", 8000.0, 0.05),
            ExpenseItem::flat("Utilities", 350.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_preserves_insertion_order() {
        let list = sample_list();
        let names: Vec<_> = list.names().collect();
        assert_eq!(names, vec!["Rent", "Payroll", "Utilities"]);
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let mut list = sample_list();
        let err = list.add(ExpenseItem::flat("Rent", 10.0)).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateExpenseName("Rent".to_string()));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_rejects_blank_name() {
        let mut list = ExpenseList::new();
        assert_eq!(
            list.add(ExpenseItem::flat("   ", 10.0)),
            Err(ValidationError::EmptyExpenseName)
        );
        assert!(list.is_empty());
    }

    #[test]
    fn test_rejects_column_label_names() {
        for name in ["Capex", "Contingency", "OPEX Total", "Total Revenue", "Month", "Taxes (15%)"] {
            let result = ExpenseList::from_items([ExpenseItem::flat(name, 200.0)]);
            assert_eq!(result, Err(ValidationError::ReservedExpenseName(name.to_string())));
        }

        let json = r#"[{"name": "Taxes (8%)", "monthly_base_amount": 10.0}]"#;
        assert!(serde_json::from_str::<ExpenseList>(json).is_err());

        let list = ExpenseList::from_items([ExpenseItem::flat("Capex lease", 200.0)]).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut list = sample_list();
        let removed = list.remove("Payroll").unwrap();
        assert_eq!(removed.monthly_base_amount, 8000.0);
        assert!(list.remove("Payroll").is_none());
        let names: Vec<_> = list.names().collect();
        assert_eq!(names, vec!["Rent", "Utilities"]);
    }

    #[test]
    fn test_updates_amount_and_growth() {
        let mut list = sample_list();
        list.set_amount("Rent", 2200.0).unwrap();
        list.set_growth("Rent", 0.03).unwrap();
        let rent = list.get("Rent").unwrap();
        assert_eq!(rent.monthly_base_amount, 2200.0);
        assert_eq!(rent.annual_growth_rate, 0.03);

        assert!(matches!(
            list.set_growth("Rent", -1.2),
            Err(ValidationError::ImpossibleGrowthRate { .. })
        ));
        assert_eq!(
            list.set_amount("Marketing", 1.0),
            Err(ValidationError::UnknownExpense("Marketing".to_string()))
        );
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[
            {"name": "Rent", "monthly_base_amount": 100.0},
            {"name": "Rent", "monthly_base_amount": 200.0}
        ]"#;
        let result: Result<ExpenseList, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_growth_defaults_to_zero() {
        let json = r#"[{"name": "Rent", "monthly_base_amount": 100.0}]"#;
        let list: ExpenseList = serde_json::from_str(json).unwrap();
        assert_eq!(list.get("Rent").unwrap().annual_growth_rate, 0.0);
    }
}
