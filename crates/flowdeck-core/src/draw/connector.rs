//! Connector presets.

/// Routing style of a connector between two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// A single straight segment.
    Straight,
    /// An L-shaped, three-segment path.
    Elbow,
}

impl ConnectorKind {
    /// The `prst` attribute value of the connector's `<a:prstGeom>`.
    pub fn preset_name(self) -> &'static str {
        match self {
            ConnectorKind::Straight => "straightConnector1",
            ConnectorKind::Elbow => "bentConnector3",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ConnectorKind::Straight => "Straight Connector",
            ConnectorKind::Elbow => "Elbow Connector",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!(ConnectorKind::Straight.preset_name(), "straightConnector1");
        assert_eq!(ConnectorKind::Elbow.preset_name(), "bentConnector3");
    }
}
