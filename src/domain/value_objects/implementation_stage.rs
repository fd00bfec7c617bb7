use serde::{Deserialize, Serialize};

/// Implementation stage of a customer onboarding. The ordering mirrors the
/// `stage_order` CASE expression in the per-tenant status view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImplementationStage {
    Onboarding,
    Planning,
    Implementation,
    Testing,
    GoLive,
    PostLaunch,
    Other(String),
}

impl ImplementationStage {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Onboarding" => ImplementationStage::Onboarding,
            "Planning" => ImplementationStage::Planning,
            "Implementation" => ImplementationStage::Implementation,
            "Testing" => ImplementationStage::Testing,
            "Go-Live" => ImplementationStage::GoLive,
            "Post-Launch" => ImplementationStage::PostLaunch,
            other => ImplementationStage::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImplementationStage::Onboarding => "Onboarding",
            ImplementationStage::Planning => "Planning",
            ImplementationStage::Implementation => "Implementation",
            ImplementationStage::Testing => "Testing",
            ImplementationStage::GoLive => "Go-Live",
            ImplementationStage::PostLaunch => "Post-Launch",
            ImplementationStage::Other(name) => name,
        }
    }

    pub fn order(&self) -> i32 {
        match self {
            ImplementationStage::Onboarding => 1,
            ImplementationStage::Planning => 2,
            ImplementationStage::Implementation => 3,
            ImplementationStage::Testing => 4,
            ImplementationStage::GoLive => 5,
            ImplementationStage::PostLaunch => 6,
            ImplementationStage::Other(_) => 99,
        }
    }
}

impl std::fmt::Display for ImplementationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
