use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::passport::{CreatePassport, Passport, UpdatePassport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "name": "John",
        "surname": "Crammer",
        "phone": "555-01-00",
        "companyId": 1,
        "passport": {
            "id": 1,
            "type": "USA-passport",
            "number": "12"
        }
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "John")]
    pub name: String,

    #[schema(example = "Crammer")]
    pub surname: String,

    #[schema(example = "555-01-00")]
    pub phone: String,

    #[schema(example = 1)]
    pub company_id: i64,

    pub passport: Passport,
}

/// Body of `POST /employee/`. Missing fields decode to their zero value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateEmployee {
    #[schema(example = "Ann")]
    pub name: String,
    #[schema(example = "Lee")]
    pub surname: String,
    #[schema(example = "123")]
    pub phone: String,
    #[schema(example = 5)]
    pub company_id: i64,
    pub passport: CreatePassport,
}

/// Body of `PUT /employee/{id}`.
///
/// An absent field, an empty string or a zero company id all mean
/// "leave unchanged", so a field can never be cleared through an update.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub company_id: Option<i64>,
    pub passport: Option<UpdatePassport>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl UpdateEmployee {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn surname(&self) -> Option<&str> {
        non_empty(&self.surname)
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.phone)
    }

    pub fn company_id(&self) -> Option<i64> {
        self.company_id.filter(|id| *id != 0)
    }

    pub fn passport_kind(&self) -> Option<&str> {
        self.passport.as_ref().and_then(|p| non_empty(&p.kind))
    }

    pub fn passport_number(&self) -> Option<&str> {
        self.passport.as_ref().and_then(|p| non_empty(&p.number))
    }

    pub fn touches_passport(&self) -> bool {
        self.passport_kind().is_some() || self.passport_number().is_some()
    }
}
