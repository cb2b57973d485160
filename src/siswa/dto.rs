use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::repo_types::Siswa;
use crate::error::ApiError;

/// Phone numbers arrive either as JSON numbers or as digit strings such as
/// `"+62895617047135"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PhoneInput {
    Number(i64),
    Text(String),
}

impl PhoneInput {
    fn into_number(self) -> Result<i64, ApiError> {
        match self {
            PhoneInput::Number(n) => Ok(n),
            PhoneInput::Text(s) => {
                let digits = s.trim();
                let digits = digits.strip_prefix('+').unwrap_or(digits);
                digits
                    .parse::<i64>()
                    .map_err(|_| ApiError::Validation(format!("phone must be a number, got {s:?}")))
            }
        }
    }
}

/// Body of `POST /siswa`. Indonesian field names are accepted as aliases.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSiswaRequest {
    #[serde(alias = "nama")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "nohp")]
    #[schema(value_type = Option<i64>)]
    pub phone: Option<PhoneInput>,
    #[serde(alias = "jurusan")]
    pub department: Option<String>,
    /// Hashed before it is stored; never echoed back.
    pub password: Option<String>,
}

/// Body of `PATCH /siswa/{id}`. Absent or null fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSiswaRequest {
    #[serde(alias = "nama")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "nohp")]
    #[schema(value_type = Option<i64>)]
    pub phone: Option<PhoneInput>,
    #[serde(alias = "jurusan")]
    pub department: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteSiswaResponse {
    pub message: String,
    /// Records that remain after the delete.
    pub users: Vec<Siswa>,
}

/// Validated create payload; the password is still plaintext here.
#[derive(Debug)]
pub struct ValidSiswa {
    pub name: String,
    pub email: String,
    pub phone: i64,
    pub department: String,
    pub password: Option<String>,
}

impl CreateSiswaRequest {
    pub fn validate(self) -> Result<ValidSiswa, ApiError> {
        let name = required_text(self.name, "name")?;
        let email = required_text(self.email, "email")?;
        check_email(&email)?;
        let phone = self
            .phone
            .ok_or_else(|| ApiError::Validation("phone is required".into()))?
            .into_number()?;
        let department = required_text(self.department, "department")?;
        let password = match self.password {
            Some(p) if p.is_empty() => {
                return Err(ApiError::Validation("password must not be empty".into()))
            }
            other => other,
        };
        Ok(ValidSiswa {
            name,
            email,
            phone,
            department,
            password,
        })
    }
}

impl UpdateSiswaRequest {
    /// Overwrite the fields that were supplied, validating each one.
    pub fn apply_to(self, siswa: &mut Siswa) -> Result<(), ApiError> {
        if let Some(name) = self.name {
            siswa.name = required_text(Some(name), "name")?;
        }
        if let Some(email) = self.email {
            let email = required_text(Some(email), "email")?;
            check_email(&email)?;
            siswa.email = email;
        }
        if let Some(phone) = self.phone {
            siswa.phone = phone.into_number()?;
        }
        if let Some(department) = self.department {
            siswa.department = required_text(Some(department), "department")?;
        }
        Ok(())
    }
}

/// Blank-only input counts as missing; anything else is kept verbatim.
fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{field} is required"))),
    }
}

/// Only the shape `local@domain`; single-label domains such as `localhost`
/// are accepted.
fn check_email(email: &str) -> Result<(), ApiError> {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@]+@[^@]+$").unwrap();
    }
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("invalid email {email:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn create(body: serde_json::Value) -> Result<ValidSiswa, ApiError> {
        serde_json::from_value::<CreateSiswaRequest>(body)
            .unwrap()
            .validate()
    }

    fn existing() -> Siswa {
        Siswa {
            id: Uuid::new_v4(),
            name: "A".into(),
            email: "a@x.com".into(),
            phone: 1,
            department: "IPA".into(),
            password_hash: None,
        }
    }

    #[test]
    fn valid_create_payload() {
        let v = create(json!({"name": "A", "email": "a@x.com", "phone": 1, "department": "IPA"}))
            .unwrap();
        assert_eq!(v.name, "A");
        assert_eq!(v.phone, 1);
        assert!(v.password.is_none());
    }

    #[test]
    fn indonesian_aliases_and_string_phone() {
        let v = create(json!({
            "nama": "Maxi Aditya Kusuma",
            "email": "maxi@filiasofia.sch.id",
            "nohp": "+62895617047135",
            "jurusan": "IPA",
            "password": "rahasia"
        }))
        .unwrap();
        assert_eq!(v.name, "Maxi Aditya Kusuma");
        assert_eq!(v.phone, 62895617047135);
        assert_eq!(v.department, "IPA");
        assert_eq!(v.password.as_deref(), Some("rahasia"));
    }

    #[test]
    fn missing_or_blank_fields_are_rejected() {
        let err = create(json!({"email": "a@x.com", "phone": 1, "department": "IPA"})).unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let err = create(json!({"name": "  ", "email": "a@x.com", "phone": 1, "department": "IPA"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let err = create(json!({"name": "A", "email": "a@x.com", "department": "IPA"})).unwrap_err();
        assert_eq!(err.to_string(), "phone is required");
    }

    #[test]
    fn malformed_phone_and_email_are_rejected() {
        let err = create(json!({"name": "A", "email": "a@x.com", "phone": "abc", "department": "IPA"}))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = create(json!({"name": "A", "email": "nope", "phone": 1, "department": "IPA"}))
            .unwrap_err();
        assert!(err.to_string().contains("invalid email"));
    }

    #[test]
    fn text_fields_are_kept_exactly_as_submitted() {
        let v = create(json!({
            "name": " A ",
            "email": "admin@localhost",
            "phone": 1,
            "department": "IPA "
        }))
        .unwrap();
        assert_eq!(v.name, " A ");
        assert_eq!(v.email, "admin@localhost");
        assert_eq!(v.department, "IPA ");

        let mut s = existing();
        let patch: UpdateSiswaRequest =
            serde_json::from_value(json!({"nama": "  B", "email": "root@host"})).unwrap();
        patch.apply_to(&mut s).unwrap();
        assert_eq!(s.name, "  B");
        assert_eq!(s.email, "root@host");
    }

    #[test]
    fn partial_update_touches_only_supplied_fields() {
        let mut s = existing();
        let patch: UpdateSiswaRequest =
            serde_json::from_value(json!({"jurusan": "IPS", "email": null})).unwrap();
        patch.apply_to(&mut s).unwrap();
        assert_eq!(s.department, "IPS");
        assert_eq!(s.name, "A");
        assert_eq!(s.email, "a@x.com");
        assert_eq!(s.phone, 1);
    }

    #[test]
    fn update_rejects_blank_strings() {
        let mut s = existing();
        let patch: UpdateSiswaRequest = serde_json::from_value(json!({"name": ""})).unwrap();
        assert!(patch.apply_to(&mut s).is_err());
    }
}
