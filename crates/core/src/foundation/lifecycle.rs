/// Bootstrap lifecycle states, in the order the sequencer moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Nothing has happened yet
    Created,
    /// Container builder and application model exist
    SetUp,
    /// Providers have registered their bindings
    Registered,
    /// Container is built and providers are booted
    Booted,
    /// Ready hooks have completed
    Running,
    /// Shutdown hooks have completed
    Stopped,
}

impl LifecycleState {
    /// Check if the application has been set up
    pub fn is_set_up(&self) -> bool {
        !matches!(self, LifecycleState::Created)
    }

    /// Check if providers have been booted
    pub fn is_booted(&self) -> bool {
        matches!(
            self,
            LifecycleState::Booted | LifecycleState::Running | LifecycleState::Stopped
        )
    }

    /// Check if the application has stopped
    pub fn is_stopped(&self) -> bool {
        matches!(self, LifecycleState::Stopped)
    }

    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Created => "created",
            LifecycleState::SetUp => "setup",
            LifecycleState::Registered => "registered",
            LifecycleState::Booted => "booted",
            LifecycleState::Running => "running",
            LifecycleState::Stopped => "stopped",
        }
    }
}

impl Default for LifecycleState {
    fn default() -> Self {
        LifecycleState::Created
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(format!("{}", LifecycleState::Created), "created");
        assert_eq!(format!("{}", LifecycleState::Booted), "booted");
        assert_eq!(format!("{}", LifecycleState::Stopped), "stopped");
    }

    #[test]
    fn test_state_predicates() {
        assert!(!LifecycleState::Created.is_set_up());
        assert!(LifecycleState::SetUp.is_set_up());
        assert!(!LifecycleState::Registered.is_booted());
        assert!(LifecycleState::Running.is_booted());
        assert!(LifecycleState::Stopped.is_stopped());
    }
}
