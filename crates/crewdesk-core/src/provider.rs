#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Local,
    Workflow,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Local => "local",
            Provider::Workflow => "workflow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" | "offline" => Some(Provider::Local),
            "workflow" | "mastra" => Some(Provider::Workflow),
            _ => None,
        }
    }

    pub fn all() -> Vec<Provider> {
        vec![Provider::Workflow, Provider::Local]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Local => "Local assistant",
            Provider::Workflow => "Workflow engine",
        }
    }

    /// The other provider, used by the in-app toggle
    pub fn toggled(&self) -> Self {
        match self {
            Provider::Local => Provider::Workflow,
            Provider::Workflow => Provider::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!(Provider::from_str("Mastra"), Some(Provider::Workflow));
        assert_eq!(Provider::from_str(" local "), Some(Provider::Local));
        assert_eq!(Provider::from_str("ollama"), None);
    }

    #[test]
    fn test_as_str_round_trips() {
        for provider in Provider::all() {
            assert_eq!(Provider::from_str(provider.as_str()), Some(provider));
        }
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Provider::Local.toggled(), Provider::Workflow);
        assert_eq!(Provider::Workflow.toggled(), Provider::Local);
    }
}
