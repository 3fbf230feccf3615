//! Load generations for dataset switching.
//!
//! Every load request takes a ticket; only the most recent ticket may render.

/// Ticket identifying one load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    /// Monotonic request number.
    pub generation: u64,
    /// Asset key that was requested.
    pub asset_key: String,
}

/// Issues tickets and tells whether a ticket is still current.
#[derive(Debug, Clone, Default)]
pub struct LoadGenerations {
    latest: u64,
}

impl LoadGenerations {
    /// Create a counter with no outstanding requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&mut self, asset_key: impl Into<String>) -> LoadTicket {
        self.latest += 1;
        LoadTicket {
            generation: self.latest,
            asset_key: asset_key.into(),
        }
    }

    /// Whether the ticket belongs to the latest request.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.latest
    }

    /// Generation of the latest request (0 before any request).
    pub fn latest(&self) -> u64 {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut generations = LoadGenerations::new();
        let first = generations.begin("mantra");
        assert!(generations.is_current(&first));

        let second = generations.begin("stock-a");
        assert!(!generations.is_current(&first));
        assert!(generations.is_current(&second));
        assert_eq!(generations.latest(), 2);
    }
}
