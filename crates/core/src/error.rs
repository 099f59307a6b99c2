//! Error types for configuration and resource management
//!
//! Configuration problems are detected eagerly when a configuration is
//! applied, never mid-tick. Resource problems cover grid allocation only;
//! kernel math itself is total and cannot fail.

/// Errors raised by configuration validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions are zero or not divisible by the work-group size
    InvalidResolution { width: u32, height: u32 },
    /// A strictly positive parameter was zero, negative, or not finite
    NonPositive { name: &'static str, value: f32 },
    /// A parameter that must be finite was NaN or infinite
    NonFinite { name: &'static str, value: f32 },
    /// A dissipation factor fell outside (0, 1]
    DissipationOutOfRange { name: &'static str, value: f32 },
    /// The Jacobi iteration count must be at least 1
    ZeroIterations,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidResolution { width, height } => write!(
                f,
                "Invalid resolution {width}x{height}: both axes must be positive multiples of the work-group size"
            ),
            ConfigError::NonPositive { name, value } => {
                write!(f, "Parameter '{name}' must be a positive finite number, got {value}")
            }
            ConfigError::NonFinite { name, value } => {
                write!(f, "Parameter '{name}' must be finite, got {value}")
            }
            ConfigError::DissipationOutOfRange { name, value } => {
                write!(f, "Dissipation '{name}' must lie in (0, 1], got {value}")
            }
            ConfigError::ZeroIterations => {
                write!(f, "Jacobi iteration count must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised when provisioning grid storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    /// The backing storage for a grid of the given dimensions could not be
    /// reserved
    AllocationFailed { width: usize, height: usize },
}

impl std::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceError::AllocationFailed { width, height } => {
                write!(f, "Failed to allocate a {width}x{height} grid field")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// Top-level error type returned by the simulator API
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimError {
    /// A configuration value was rejected
    Config(ConfigError),
    /// Grid storage could not be provisioned
    Resource(ResourceError),
    /// The simulator holds no grids because a prior reallocation failed;
    /// reconfigure with a valid resolution before stepping or reading
    NotReady,
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::Config(err) => write!(f, "Configuration rejected: {err}"),
            SimError::Resource(err) => write!(f, "Resource provisioning failed: {err}"),
            SimError::NotReady => write!(
                f,
                "Simulator is not ready: grids are unallocated after a failed reconfiguration"
            ),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Config(err) => Some(err),
            SimError::Resource(err) => Some(err),
            SimError::NotReady => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        SimError::Config(err)
    }
}

impl From<ResourceError> for SimError {
    fn from(err: ResourceError) -> Self {
        SimError::Resource(err)
    }
}
