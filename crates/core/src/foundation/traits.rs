use std::any::TypeId;
use std::fmt;

/// Core trait for framework components that can be registered and managed
pub trait FrameworkComponent: Send + Sync + 'static {
    /// Get the type name of this component
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Get the TypeId of this component
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Service trait for dependency injection
pub trait Service: FrameworkComponent {
    /// Service identifier - usually the type name
    fn service_id(&self) -> String {
        self.type_name().to_string()
    }
}

impl fmt::Debug for dyn FrameworkComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameworkComponent")
            .field("type_name", &self.type_name())
            .finish()
    }
}

impl fmt::Debug for dyn Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("service_id", &self.service_id())
            .field("type_name", &self.type_name())
            .finish()
    }
}
