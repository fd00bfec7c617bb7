use crate::domain::value_objects::TenantId;

#[derive(Debug)]
pub enum TenantAccessError {
    InvalidFormat(String),
    Unregistered(String),
}

impl std::fmt::Display for TenantAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantAccessError::InvalidFormat(msg) => write!(f, "{}", msg),
            TenantAccessError::Unregistered(_) => write!(f, "Invalid tenant ID"),
        }
    }
}

impl std::error::Error for TenantAccessError {}

/// The set of tenants this deployment serves. Requests naming anything else
/// are rejected up front, before any storage is touched.
#[derive(Debug, Clone)]
pub struct TenantRegistry {
    tenants: Vec<TenantId>,
}

impl TenantRegistry {
    pub fn new(tenants: Vec<TenantId>) -> Self {
        Self { tenants }
    }

    pub fn resolve(&self, raw: &str) -> Result<TenantId, TenantAccessError> {
        let tenant = TenantId::new(raw).map_err(TenantAccessError::InvalidFormat)?;
        if self.tenants.contains(&tenant) {
            Ok(tenant)
        } else {
            Err(TenantAccessError::Unregistered(raw.to_string()))
        }
    }

    pub fn tenants(&self) -> &[TenantId] {
        &self.tenants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TenantRegistry {
        TenantRegistry::new(vec![
            TenantId::new("acme").unwrap(),
            TenantId::new("globex").unwrap(),
        ])
    }

    #[test]
    fn test_registered_tenant_resolves() {
        assert_eq!(registry().resolve("acme").unwrap().as_str(), "acme");
    }

    #[test]
    fn test_unregistered_tenant_is_rejected() {
        assert!(matches!(
            registry().resolve("initech"),
            Err(TenantAccessError::Unregistered(_))
        ));
    }

    #[test]
    fn test_malformed_tenant_is_rejected_before_lookup() {
        assert!(matches!(
            registry().resolve("not a tenant!"),
            Err(TenantAccessError::InvalidFormat(_))
        ));
    }
}
