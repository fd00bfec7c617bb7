pub mod ports;
pub mod services;
pub mod tenant_registry;
pub mod use_cases;
