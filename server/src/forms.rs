//! Request forms for employee writes and their declarative validation rules.

use entity::employee::Gender;
use once_cell::sync::Lazy;
use platform_api::FieldErrors;
use platform_db::{EmployeeChanges, NewEmployee};
use regex::Regex;
use serde::{Deserialize, Deserializer, de};
use validator::{Validate, ValidationErrors};

/// 6-16 latin letters, digits, `_` or `-`, or 2-5 CJK characters.
static EMP_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9_-]{6,16}|[\x{2E80}-\x{9FFF}]{2,5})$")
        .expect("employee name pattern compiles")
});

static GENDER: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[MF]$").expect("gender pattern compiles"));

pub const EMP_NAME_RULE: &str =
    "empName must be 6-16 letters, digits, `_` or `-`, or 2-5 CJK characters";
pub const EMP_NAME_TAKEN: &str = "empName is unavailable";
pub const D_ID_UNKNOWN: &str = "dId does not name an existing department";

pub fn is_valid_emp_name(name: &str) -> bool {
    EMP_NAME.is_match(name)
}

/// Fields of `POST /emp`, bound from the query string and the form body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EmployeeForm {
    #[serde(rename = "empName")]
    #[validate(regex(
        path = *EMP_NAME,
        message = "empName must be 6-16 letters, digits, `_` or `-`, or 2-5 CJK characters"
    ))]
    pub emp_name: Option<String>,
    #[validate(regex(path = *GENDER, message = "gender must be M or F"))]
    pub gender: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    #[serde(rename = "dId", default, deserialize_with = "blank_as_none")]
    pub d_id: Option<i32>,
}

impl EmployeeForm {
    pub fn into_new_employee(self) -> Result<NewEmployee, FieldErrors> {
        let mut errors = rule_errors(&self);
        let emp_name = required(self.emp_name, "empName", &mut errors);
        let email = required(self.email, "email", &mut errors);
        // A malformed code already failed the GENDER rule above.
        let gender = required(self.gender, "gender", &mut errors)
            .as_deref()
            .and_then(Gender::from_code);
        match (emp_name, gender, email) {
            (Some(emp_name), Some(gender), Some(email)) if errors.is_empty() => Ok(NewEmployee {
                emp_name,
                gender,
                email,
                d_id: self.d_id,
            }),
            _ => Err(errors),
        }
    }
}

impl Overlay for EmployeeForm {
    fn overlay(self, top: Self) -> Self {
        Self {
            emp_name: top.emp_name.or(self.emp_name),
            gender: top.gender.or(self.gender),
            email: top.email.or(self.email),
            d_id: top.d_id.or(self.d_id),
        }
    }
}

/// Fields of `PUT /emp/{empId}`: every field optional, rules apply to the
/// fields that are present.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EmployeePatch {
    #[serde(rename = "empName")]
    #[validate(regex(
        path = *EMP_NAME,
        message = "empName must be 6-16 letters, digits, `_` or `-`, or 2-5 CJK characters"
    ))]
    pub emp_name: Option<String>,
    #[validate(regex(path = *GENDER, message = "gender must be M or F"))]
    pub gender: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    #[serde(rename = "dId", default, deserialize_with = "blank_as_none")]
    pub d_id: Option<i32>,
}

impl EmployeePatch {
    pub fn into_changes(self) -> Result<EmployeeChanges, FieldErrors> {
        let errors = rule_errors(&self);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(EmployeeChanges {
            emp_name: self.emp_name,
            gender: self.gender.as_deref().and_then(Gender::from_code),
            email: self.email,
            d_id: self.d_id,
        })
    }
}

impl Overlay for EmployeePatch {
    fn overlay(self, top: Self) -> Self {
        Self {
            emp_name: top.emp_name.or(self.emp_name),
            gender: top.gender.or(self.gender),
            email: top.email.or(self.email),
            d_id: top.d_id.or(self.d_id),
        }
    }
}

/// Field sets that can be bound from two sources.
pub trait Overlay {
    /// Fields present in `top` win over the ones in `self`.
    fn overlay(self, top: Self) -> Self;
}

/// `dId=` binds to no department rather than failing to parse.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

fn required<T>(value: Option<T>, field: &str, errors: &mut FieldErrors) -> Option<T> {
    if value.is_none() {
        errors.insert(field.to_string(), format!("{field} is required"));
    }
    value
}

fn rule_errors(form: &impl Validate) -> FieldErrors {
    match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => field_errors(&errors),
    }
}

/// Flatten validator output into `{wire field name: first message}`.
fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, failures)| {
            let field: &str = field.as_ref();
            let name = wire_name(field);
            let message = failures
                .iter()
                .find_map(|failure| failure.message.as_ref())
                .map(|message| message.to_string())
                .unwrap_or_else(|| format!("{name} is invalid"));
            (name.to_string(), message)
        })
        .collect()
}

fn wire_name(field: &str) -> &str {
    match field {
        "emp_name" => "empName",
        "d_id" => "dId",
        other => other,
    }
}
