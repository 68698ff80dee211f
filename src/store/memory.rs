use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{EmployeeStore, StoreError, StoreResult};
use crate::model::employee::{CreateEmployee, Employee, UpdateEmployee};
use crate::model::passport::{CreatePassport, Passport};

#[derive(Default)]
struct Tables {
    employees: BTreeMap<i64, EmployeeRecord>,
    passports: BTreeMap<i64, Passport>,
    next_employee_id: i64,
    next_passport_id: i64,
}

struct EmployeeRecord {
    name: String,
    surname: String,
    phone: String,
    company_id: i64,
    passport_id: i64,
}

/// Same contract as the MySQL store, kept in process memory.
///
/// Passports live in their own table so that deleting an employee leaves
/// the passport behind, like the relational schema does.
#[derive(Default)]
pub struct InMemoryEmployeeStore {
    tables: RwLock<Tables>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with three demo employees across companies 1 and 2.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write().expect("employee store poisoned");
            for (name, surname, phone, company_id) in [
                ("John", "Crammer", "555-01-00", 1),
                ("Ivan", "Ivanov", "01010101", 2),
                ("Petr", "Petrov", "1111111", 2),
            ] {
                tables.insert(CreateEmployee {
                    name: name.into(),
                    surname: surname.into(),
                    phone: phone.into(),
                    company_id,
                    passport: CreatePassport {
                        kind: "USA-passport".into(),
                        number: "12".into(),
                    },
                });
            }
        }
        store
    }

    #[cfg(test)]
    pub fn passport_count(&self) -> usize {
        self.tables.read().expect("employee store poisoned").passports.len()
    }
}

impl Tables {
    fn insert(&mut self, employee: CreateEmployee) -> i64 {
        self.next_passport_id += 1;
        let passport_id = self.next_passport_id;
        self.passports.insert(
            passport_id,
            Passport {
                id: passport_id,
                kind: employee.passport.kind,
                number: employee.passport.number,
            },
        );

        self.next_employee_id += 1;
        let employee_id = self.next_employee_id;
        self.employees.insert(
            employee_id,
            EmployeeRecord {
                name: employee.name,
                surname: employee.surname,
                phone: employee.phone,
                company_id: employee.company_id,
                passport_id,
            },
        );

        employee_id
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list_by_company(&self, company_id: i64) -> StoreResult<Vec<Employee>> {
        let tables = self.tables.read().expect("employee store poisoned");

        // inner join: employees whose passport is gone are skipped
        let employees = tables
            .employees
            .iter()
            .filter(|(_, e)| e.company_id == company_id)
            .filter_map(|(id, e)| {
                tables.passports.get(&e.passport_id).map(|p| Employee {
                    id: *id,
                    name: e.name.clone(),
                    surname: e.surname.clone(),
                    phone: e.phone.clone(),
                    company_id: e.company_id,
                    passport: p.clone(),
                })
            })
            .collect();

        Ok(employees)
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let tables = self.tables.read().expect("employee store poisoned");
        Ok(tables.employees.contains_key(&id))
    }

    async fn insert(&self, employee: CreateEmployee) -> StoreResult<i64> {
        let mut tables = self.tables.write().expect("employee store poisoned");
        Ok(tables.insert(employee))
    }

    async fn update(&self, id: i64, changes: UpdateEmployee) -> StoreResult<()> {
        let mut tables = self.tables.write().expect("employee store poisoned");
        let tables = &mut *tables;

        let record = tables
            .employees
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(passport) = tables.passports.get_mut(&record.passport_id) {
            if let Some(kind) = changes.passport_kind() {
                passport.kind = kind.to_string();
            }
            if let Some(number) = changes.passport_number() {
                passport.number = number.to_string();
            }
        }

        if let Some(name) = changes.name() {
            record.name = name.to_string();
        }
        if let Some(surname) = changes.surname() {
            record.surname = surname.to_string();
        }
        if let Some(phone) = changes.phone() {
            record.phone = phone.to_string();
        }
        if let Some(company_id) = changes.company_id() {
            record.company_id = company_id;
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().expect("employee store poisoned");
        tables.employees.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::passport::UpdatePassport;

    fn ann() -> CreateEmployee {
        CreateEmployee {
            name: "Ann".into(),
            surname: "Lee".into(),
            phone: "123".into(),
            company_id: 5,
            passport: CreatePassport {
                kind: "ID".into(),
                number: "X1".into(),
            },
        }
    }

    #[actix_web::test]
    async fn insert_assigns_increasing_ids() {
        let store = InMemoryEmployeeStore::with_demo_data();

        let first = store.insert(ann()).await.unwrap();
        let second = store.insert(ann()).await.unwrap();

        assert_eq!(first, 4);
        assert!(second > first);
    }

    #[actix_web::test]
    async fn list_returns_only_matching_company_with_passports() {
        let store = InMemoryEmployeeStore::with_demo_data();

        let employees = store.list_by_company(2).await.unwrap();

        let names: Vec<_> = employees.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ivan", "Petr"]);
        assert!(employees.iter().all(|e| e.passport.kind == "USA-passport"));
        assert!(store.list_by_company(42).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn update_changes_only_supplied_fields() {
        let store = InMemoryEmployeeStore::new();
        let id = store.insert(ann()).await.unwrap();

        store
            .update(
                id,
                UpdateEmployee {
                    name: Some("Anna".into()),
                    phone: Some(String::new()),
                    company_id: Some(0),
                    passport: Some(UpdatePassport {
                        kind: None,
                        number: Some("X2".into()),
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let employee = &store.list_by_company(5).await.unwrap()[0];
        assert_eq!(employee.name, "Anna");
        assert_eq!(employee.surname, "Lee");
        assert_eq!(employee.phone, "123");
        assert_eq!(employee.passport.kind, "ID");
        assert_eq!(employee.passport.number, "X2");
    }

    #[actix_web::test]
    async fn update_of_unknown_employee_is_not_found() {
        let store = InMemoryEmployeeStore::new();

        let err = store.update(99, UpdateEmployee::default()).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound(99)));
    }

    #[actix_web::test]
    async fn delete_keeps_passport_and_ignores_unknown_ids() {
        let store = InMemoryEmployeeStore::new();
        let id = store.insert(ann()).await.unwrap();

        assert!(store.exists(id).await.unwrap());
        store.delete(id).await.unwrap();
        store.delete(id).await.unwrap();

        assert!(!store.exists(id).await.unwrap());

        assert!(store.list_by_company(5).await.unwrap().is_empty());
        assert_eq!(store.passport_count(), 1);
    }
}
