// ABOUTME: garde-derived payloads for pagination and create/update requests.
// ABOUTME: validate_payload converts a garde Report into ValidationErrors.

use garde::{Report, Validate};
use serde::Deserialize;

use crate::error::{FieldError, ValidationErrors};

/// Default page size when the caller does not send one.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Validate a payload, collecting every failing field.
pub fn validate_payload<T>(value: &T) -> Result<(), ValidationErrors>
where
    T: Validate,
    T::Context: Default,
{
    value.validate().map_err(|report| field_errors(&report))
}

fn field_errors(report: &Report) -> ValidationErrors {
    let errors = report
        .iter()
        .map(|(path, error)| FieldError {
            field: path.to_string(),
            message: error.message().to_string(),
        })
        .collect();
    ValidationErrors { errors }
}

/// Pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PageParams {
    #[garde(range(min = 1))]
    pub page: Option<u32>,

    #[garde(range(min = 1, max = 100))]
    pub per_page: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page().saturating_sub(1)) * u64::from(self.per_page())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[garde(length(min = 1, max = 255))]
    pub name: String,

    #[garde(email)]
    pub email: String,

    #[garde(length(min = 8, max = 255))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[garde(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[garde(email)]
    pub email: Option<String>,

    #[garde(length(min = 8, max = 255))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRestaurant {
    #[garde(length(min = 1, max = 255))]
    pub name: String,

    #[garde(length(max = 500))]
    pub address: Option<String>,

    #[garde(length(min = 6, max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRestaurant {
    #[garde(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[garde(length(max = 500))]
    pub address: Option<String>,

    #[garde(length(min = 6, max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClient {
    #[garde(length(min = 1, max = 255))]
    pub name: String,

    #[garde(url)]
    pub redirect: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRole {
    #[garde(pattern(r"^[a-z][a-z0-9_-]*$"), length(max = 64))]
    pub name: String,

    #[garde(length(max = 255))]
    pub display_name: Option<String>,

    #[garde(length(max = 1000))]
    pub description: Option<String>,
}
