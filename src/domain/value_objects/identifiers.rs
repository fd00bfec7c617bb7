use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{1,20}$").unwrap())
}

/// Logical customer partition. Tenant ids are the only values ever
/// interpolated into per-tenant table names, so the format is strict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    pub fn new(raw: &str) -> Result<Self, String> {
        if identifier_pattern().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(format!("Invalid tenant ID format: '{}'", raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TenantId::new(&value)
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer identifier inside a tenant. Same format rule as tenant ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(raw: &str) -> Result<Self, String> {
        if identifier_pattern().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(format!("Invalid customer ID format: '{}'", raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CustomerId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CustomerId::new(&value)
    }
}

impl From<CustomerId> for String {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tenant_ids() {
        assert!(TenantId::new("acme").is_ok());
        assert!(TenantId::new("tenant-01").is_ok());
        assert!(TenantId::new("TENANT_A").is_ok());
        assert!(TenantId::new("x").is_ok());
    }

    #[test]
    fn test_invalid_tenant_ids() {
        assert!(TenantId::new("").is_err());
        assert!(TenantId::new("has space").is_err());
        assert!(TenantId::new("semi;colon").is_err());
        assert!(TenantId::new("dots.not.allowed").is_err());
        assert!(TenantId::new("this_tenant_id_is_way_too_long").is_err());
    }

    #[test]
    fn test_sql_injection_shapes_rejected() {
        assert!(TenantId::new("a; DROP TABLE x").is_err());
        assert!(TenantId::new("a'--").is_err());
        assert!(CustomerId::new("1 OR 1=1").is_err());
    }

    #[test]
    fn test_customer_id_roundtrip() {
        let id = CustomerId::new("cust-001").unwrap();
        assert_eq!(id.as_str(), "cust-001");
        assert_eq!(id.to_string(), "cust-001");
    }
}
