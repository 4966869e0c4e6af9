//! Seed data loading from a TOML file
//!
//! The hierarchy is static for a session: clients, stores and employees are
//! read once from the seed file, together with any historical sales and the
//! display groups. Super goals may be omitted and default to 1.3× the goal.

use crate::{
    core::{
        classify::{check_goals, default_super_goal},
        entity_store::EntityStore,
        navigator::Level,
        projector::GroupSpec,
    },
    entities::{Client, Employee, NewSale, Store},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::{collections::HashMap, path::Path};
use tracing::{debug, info, warn};

/// Structure of the whole seed file
#[derive(Debug, Default, Deserialize)]
pub struct SeedConfig {
    /// Root entities
    #[serde(default)]
    pub clients: Vec<ClientSeed>,
    /// Stores and their owning client
    #[serde(default)]
    pub stores: Vec<StoreSeed>,
    /// Employees and their store
    #[serde(default)]
    pub employees: Vec<EmployeeSeed>,
    /// Historical sales
    #[serde(default)]
    pub sales: Vec<SaleSeed>,
    /// Display groups, each bound to one level
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
}

/// A client entry
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSeed {
    /// Unique among clients
    pub id: String,
    /// Display name
    pub name: String,
}

/// A store entry
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSeed {
    /// Unique among stores
    pub id: String,
    /// Display name
    pub name: String,
    /// Owning client
    pub client_id: String,
    /// Daily goal
    pub daily_goal: f64,
    /// Daily super goal, 1.3× the goal when absent
    #[serde(default)]
    pub super_goal: Option<f64>,
}

/// An employee entry
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeSeed {
    /// Unique among employees
    pub id: String,
    /// Display name
    pub name: String,
    /// Store the employee works in
    pub store_id: String,
    /// Daily goal
    pub daily_goal: f64,
    /// Daily super goal, 1.3× the goal when absent
    #[serde(default)]
    pub super_goal: Option<f64>,
}

/// A historical sale
#[derive(Debug, Clone, Deserialize)]
pub struct SaleSeed {
    /// Sale id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    /// Employee credited with the sale
    pub employee_id: String,
    /// Amount
    pub amount: f64,
    /// Day of the sale, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// A display group bound to the level whose rows it collects
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSeed {
    /// Level the group applies to
    pub level: Level,
    /// The group itself
    #[serde(flatten)]
    pub group: GroupSpec,
}

/// Reads and parses a seed file.
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path_ref = path.as_ref();
    debug!(path = ?path_ref, "Loading seed file");
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {}: {e}", path_ref.display()),
    })?;
    parse_seed(&contents)
}

/// Parses seed TOML.
pub fn parse_seed(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

impl SeedConfig {
    /// Builds an entity store from the seed.
    ///
    /// Duplicate ids and sales for unknown employees are errors. Orphans
    /// and super goals below their goal are only reported.
    pub fn build_store(&self) -> Result<EntityStore> {
        let mut store = EntityStore::new();

        for client in &self.clients {
            store.insert_client(Client::new(&client.id, &client.name))?;
        }
        for s in &self.stores {
            let super_goal = resolve_super_goal(&s.id, s.daily_goal, s.super_goal);
            store.insert_store(Store::new(
                &s.id,
                &s.name,
                &s.client_id,
                s.daily_goal,
                super_goal,
            ))?;
        }
        for e in &self.employees {
            let super_goal = resolve_super_goal(&e.id, e.daily_goal, e.super_goal);
            store.insert_employee(Employee::new(
                &e.id,
                &e.name,
                &e.store_id,
                e.daily_goal,
                super_goal,
            ))?;
        }

        for orphan in store.orphan_stores() {
            warn!(store_id = %orphan.id, client_id = %orphan.client_id, "Store references unknown client");
        }
        for orphan in store.orphan_employees() {
            warn!(employee_id = %orphan.id, store_id = %orphan.store_id, "Employee references unknown store");
        }

        for sale in &self.sales {
            let new_sale = NewSale {
                employee_id: sale.employee_id.clone(),
                amount: sale.amount,
                date: sale.date,
                description: sale.description.clone(),
            };
            match &sale.id {
                Some(id) => store.insert_sale(new_sale.with_id(id.clone()))?,
                None => {
                    store.record_sale(new_sale)?;
                }
            }
        }

        info!(
            clients = store.clients().len(),
            stores = store.stores().len(),
            employees = store.employees().len(),
            sales = store.events().sales().len(),
            "Seed loaded"
        );
        Ok(store)
    }

    /// Display groups keyed by the level they apply to.
    #[must_use]
    pub fn groups_by_level(&self) -> HashMap<Level, Vec<GroupSpec>> {
        let mut by_level: HashMap<Level, Vec<GroupSpec>> = HashMap::new();
        for seed in &self.groups {
            by_level
                .entry(seed.level)
                .or_default()
                .push(seed.group.clone());
        }
        by_level
    }
}

fn resolve_super_goal(id: &str, goal: f64, super_goal: Option<f64>) -> f64 {
    let super_goal = super_goal.unwrap_or_else(|| default_super_goal(goal));
    if let Err(e) = check_goals(id, goal, super_goal) {
        warn!(error = %e, "Keeping inconsistent goals as configured");
    }
    super_goal
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::NodeRef;

    const SEED: &str = r#"
        [[clients]]
        id = "1"
        name = "TechCorp Brasil"

        [[stores]]
        id = "1"
        name = "TechCorp - São Paulo"
        client_id = "1"
        daily_goal = 15000.0
        super_goal = 19500.0

        [[stores]]
        id = "9"
        name = "Lost"
        client_id = "404"
        daily_goal = 100.0

        [[employees]]
        id = "1"
        name = "Carlos Silva"
        store_id = "1"
        daily_goal = 3000.0

        [[sales]]
        id = "1"
        employee_id = "1"
        amount = 4200.0
        date = "2025-01-03"

        [[sales]]
        employee_id = "1"
        amount = 800.0
        date = "2025-01-03"
        description = "Accessories"

        [[groups]]
        level = "employees"
        id = "g1"
        name = "Front desk"
        members = ["1"]
    "#;

    #[test]
    fn test_parse_seed() {
        let seed = parse_seed(SEED).unwrap();
        assert_eq!(seed.clients.len(), 1);
        assert_eq!(seed.stores.len(), 2);
        assert_eq!(seed.stores[1].super_goal, None);
        assert_eq!(seed.sales[1].description.as_deref(), Some("Accessories"));
        assert_eq!(seed.groups[0].level, Level::Employees);
        assert_eq!(seed.groups[0].group.members, vec!["1".to_string()]);
        assert!(seed.groups[0].group.subgroups.is_empty());
    }

    #[test]
    fn test_build_store_defaults_super_goal() {
        let store = parse_seed(SEED).unwrap().build_store().unwrap();
        assert_eq!(store.employee_by_id("1").unwrap().super_goal, 3900.0);
        assert_eq!(store.store_by_id("9").unwrap().super_goal, 130.0);
        assert_eq!(store.store_by_id("1").unwrap().super_goal, 19500.0);
    }

    #[test]
    fn test_build_store_keeps_orphans_out_of_hierarchy() {
        let store = parse_seed(SEED).unwrap().build_store().unwrap();
        assert_eq!(store.orphan_stores().len(), 1);
        assert_eq!(
            store.children(&NodeRef::client("1")).unwrap(),
            vec![NodeRef::store("1")]
        );
    }

    #[test]
    fn test_build_store_loads_sales() {
        let store = parse_seed(SEED).unwrap().build_store().unwrap();
        assert_eq!(store.events().sales().len(), 2);
        assert_eq!(store.sale_by_id("1").unwrap().amount, 4200.0);
    }

    #[test]
    fn test_sale_for_unknown_employee_fails() {
        let seed = parse_seed(
            r#"
            [[sales]]
            employee_id = "77"
            amount = 1.0
            date = "2025-01-03"
            "#,
        )
        .unwrap();
        assert!(seed.build_store().is_err());
    }

    #[test]
    fn test_duplicate_client_fails() {
        let seed = parse_seed(
            r#"
            [[clients]]
            id = "1"
            name = "A"
            [[clients]]
            id = "1"
            name = "B"
            "#,
        )
        .unwrap();
        assert!(matches!(seed.build_store(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_empty_seed_is_valid() {
        let store = parse_seed("").unwrap().build_store().unwrap();
        assert!(store.clients().is_empty());
    }

    #[test]
    fn test_groups_by_level() {
        let groups = parse_seed(SEED).unwrap().groups_by_level();
        assert_eq!(groups[&Level::Employees].len(), 1);
        assert!(!groups.contains_key(&Level::Stores));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            parse_seed("[[clients]\nid ="),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_seed("does/not/exist.toml"),
            Err(Error::Config { .. })
        ));
    }
}
