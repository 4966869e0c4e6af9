//! Shared test utilities for the sales tracker.
//!
//! Provides a store seeded with the reference dataset: three clients, four
//! stores, seven employees and nine sales, all dated [`reference_date`].

#![allow(clippy::unwrap_used)]

use crate::{
    core::entity_store::EntityStore,
    entities::{Client, Employee, NewSale, Store},
};
use chrono::NaiveDate;

/// Day every seeded sale falls on (a Friday).
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
}

/// A day with no seeded sales.
pub fn other_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
}

/// A sale without description for `employee_id` on `date`.
pub fn new_sale(employee_id: &str, amount: f64, date: NaiveDate) -> NewSale {
    NewSale {
        employee_id: employee_id.to_string(),
        amount,
        date,
        description: None,
    }
}

/// Builds the reference dataset.
///
/// | client | stores | employees |
/// |--------|--------|-----------|
/// | 1 TechCorp Brasil | 1, 2 | 1-3, 4-5 |
/// | 2 Varejo Plus | 3 | 6 |
/// | 3 Fashion Store | 4 | 7 |
pub fn seeded_store() -> EntityStore {
    let mut store = EntityStore::new();

    for (id, name) in [
        ("1", "TechCorp Brasil"),
        ("2", "Varejo Plus"),
        ("3", "Fashion Store"),
    ] {
        store.insert_client(Client::new(id, name)).unwrap();
    }

    for (id, name, client_id, goal, super_goal) in [
        ("1", "TechCorp - São Paulo", "1", 15000.0, 19500.0),
        ("2", "TechCorp - Rio de Janeiro", "1", 12000.0, 15600.0),
        ("3", "Varejo Plus - Centro", "2", 8000.0, 10400.0),
        ("4", "Fashion Store - Shopping", "3", 10000.0, 13000.0),
    ] {
        store
            .insert_store(Store::new(id, name, client_id, goal, super_goal))
            .unwrap();
    }

    for (id, name, store_id, goal, super_goal) in [
        ("1", "Carlos Silva", "1", 3000.0, 3900.0),
        ("2", "Ana Costa", "1", 3000.0, 3900.0),
        ("3", "Pedro Santos", "1", 2500.0, 3250.0),
        ("4", "Maria Oliveira", "2", 2800.0, 3640.0),
        ("5", "João Ferreira", "2", 2800.0, 3640.0),
        ("6", "Lucia Rocha", "3", 2000.0, 2600.0),
        ("7", "Rafael Lima", "4", 2500.0, 3250.0),
    ] {
        store
            .insert_employee(Employee::new(id, name, store_id, goal, super_goal))
            .unwrap();
    }

    for (id, employee_id, amount) in [
        ("1", "1", 4200.0),
        ("2", "1", 800.0),
        ("3", "2", 2100.0),
        ("4", "3", 1800.0),
        ("5", "4", 3200.0),
        ("6", "4", 900.0),
        ("7", "5", 2900.0),
        ("8", "6", 2800.0),
        ("9", "7", 3800.0),
    ] {
        store
            .insert_sale(new_sale(employee_id, amount, reference_date()).with_id(id.to_string()))
            .unwrap();
    }

    store
}
