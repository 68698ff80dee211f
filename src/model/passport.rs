use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    #[schema(example = 1)]
    pub id: i64,

    /// Free-text document classification, e.g. "USA-passport"
    #[serde(rename = "type")]
    #[schema(example = "USA-passport")]
    pub kind: String,

    #[schema(example = "X1")]
    pub number: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePassport {
    #[serde(rename = "type")]
    #[schema(example = "ID")]
    pub kind: String,
    #[schema(example = "X1")]
    pub number: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePassport {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub number: Option<String>,
}
