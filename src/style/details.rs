use serde::{Deserialize, Serialize};

use crate::foundation::error::{AdError, AdResult};

/// Separator between phone and email on the joined contact line.
pub const CONTACT_SEPARATOR: &str = " | ";

/// Business text fields drawn onto the ad.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessDetails {
    /// Company name; required.
    pub company_name: String,
    /// Phone number; may be empty.
    pub tel: String,
    /// Email address; may be empty.
    pub email: String,
}

impl BusinessDetails {
    /// Details with only a company name.
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Self::default()
        }
    }

    /// Builder-style phone number.
    pub fn with_tel(mut self, tel: impl Into<String>) -> Self {
        self.tel = tel.into();
        self
    }

    /// Builder-style email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Non-empty values of `[tel, email]` joined with `" | "`.
    pub fn contact_line(&self) -> String {
        [self.tel.as_str(), self.email.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(CONTACT_SEPARATOR)
    }

    /// A company name is required to generate an ad.
    pub fn validate(&self) -> AdResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(AdError::validation("companyName must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/details.rs"]
mod tests;
