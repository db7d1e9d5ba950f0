//! Resource collections exposed by the backend

use std::fmt;
use std::str::FromStr;

/// A tabular resource collection on the backend.
///
/// Settings are a single record rather than a collection and are fetched
/// with [`Backend::settings`](super::Backend::settings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tasks,
    Vehicles,
    Jobs,
    Users,
    Assignments,
    Routing,
}

impl Resource {
    /// Every collection, in navigation order.
    pub const ALL: [Resource; 6] = [
        Resource::Tasks,
        Resource::Vehicles,
        Resource::Jobs,
        Resource::Users,
        Resource::Assignments,
        Resource::Routing,
    ];

    /// Path segment relative to the backend base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Tasks => "tasks",
            Resource::Vehicles => "vehicles",
            Resource::Jobs => "jobs",
            Resource::Users => "users",
            Resource::Assignments => "assignments",
            Resource::Routing => "routing",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Error returned when parsing an unknown resource name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resource '{0}' (expected one of tasks, vehicles, jobs, users, assignments, routing)")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|resource| resource.path() == name)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource() {
        assert_eq!("tasks".parse::<Resource>(), Ok(Resource::Tasks));
        assert_eq!(" Vehicles ".parse::<Resource>(), Ok(Resource::Vehicles));
        assert_eq!(
            "settings".parse::<Resource>(),
            Err(UnknownResource("settings".to_string()))
        );
    }

    #[test]
    fn test_path_round_trips_through_display() {
        for resource in Resource::ALL {
            assert_eq!(resource.to_string().parse::<Resource>(), Ok(resource));
        }
    }
}
