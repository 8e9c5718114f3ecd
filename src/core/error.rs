use crate::kernel::services::ports::EnvironmentKind;

pub type Result<T> = std::result::Result<T, WindowError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The current environment cannot perform the operation.
    Unsupported {
        operation: &'static str,
        environment: EnvironmentKind,
    },
    /// The surface was released without ever resolving its result.
    Abandoned { operation: &'static str },
    /// A virtual window was handed over a second time.
    AlreadyShown { operation: &'static str },
}

impl WindowError {
    pub fn unsupported(operation: &'static str, environment: EnvironmentKind) -> Self {
        WindowError::Unsupported {
            operation,
            environment,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, WindowError::Unsupported { .. })
    }
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::Unsupported {
                operation,
                environment,
            } => write!(
                f,
                "{} is not supported in a {} environment",
                operation, environment
            ),
            WindowError::Abandoned { operation } => {
                write!(f, "{} surface was dropped before it closed", operation)
            }
            WindowError::AlreadyShown { operation } => {
                write!(f, "{}: window has already been shown once", operation)
            }
        }
    }
}

impl std::error::Error for WindowError {}
