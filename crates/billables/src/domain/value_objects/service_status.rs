//! ServiceStatus - Lifecycle state of a service record

use serde::{Deserialize, Serialize};

/// Lifecycle status of a service record.
///
/// `Cancelled` is only entered and left through explicit operator actions;
/// it is never inferred from payment fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "pending",
            ServiceStatus::Completed => "completed",
            ServiceStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ServiceStatus::Pending),
            "completed" => Ok(ServiceStatus::Completed),
            "cancelled" => Ok(ServiceStatus::Cancelled),
            _ => Err(format!("Unknown service status: {}", s)),
        }
    }
}
