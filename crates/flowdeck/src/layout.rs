//! Layout adjustments applied between parsing and rendering.
//!
//! BPMN modelers place the branches of an exclusive gateway wherever the
//! author dropped them. On a slide the first branch reads best when its top
//! edge sits a fixed distance below the gateway's vertical center, so the
//! [`GatewayAdjuster`] moves it there.

use log::{debug, trace};

use flowdeck_core::process::{NodeKind, ProcessGraph};

/// Aligns each gateway's first outgoing target below the gateway.
#[derive(Debug, Clone, Copy)]
pub struct GatewayAdjuster {
    offset: f64,
}

impl GatewayAdjuster {
    /// Creates an adjuster placing first branches `offset` inches below
    /// their gateway's vertical center.
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// Returns a copy of `graph` with first gateway branches moved.
    ///
    /// For every exclusive gateway, in document order, whose first outgoing
    /// target is a drawn node, the target's top becomes
    /// `gateway.y + gateway.height / 2 + offset`. Its x, width and height are
    /// untouched. Each gateway reads the graph as left by the gateways before
    /// it, so chained gateways see earlier moves.
    pub fn adjust(&self, graph: &ProcessGraph) -> ProcessGraph {
        let mut adjusted = graph.clone();

        let gateways: Vec<String> = graph
            .nodes()
            .filter(|node| node.kind() == NodeKind::ExclusiveGateway)
            .map(|node| node.id().to_string())
            .collect();

        for gateway_id in gateways {
            let Some(gateway) = adjusted.node(&gateway_id) else {
                continue;
            };
            let Some(gateway_bounds) = gateway.bounds() else {
                trace!(gateway = gateway_id.as_str(); "Gateway has no bounds, skipping");
                continue;
            };
            let Some(first_target) = gateway.outgoing().first().cloned() else {
                continue;
            };

            let Some(target) = adjusted.node_mut(&first_target) else {
                trace!(
                    gateway = gateway_id.as_str(),
                    target = first_target.as_str();
                    "First branch is not a recognized node"
                );
                continue;
            };
            let Some(target_bounds) = target.bounds() else {
                continue;
            };

            let y = gateway_bounds.y() + gateway_bounds.height() / 2.0 + self.offset;
            target.set_bounds(target_bounds.with_y(y));

            debug!(
                gateway = gateway_id.as_str(),
                target = first_target.as_str(),
                from = target_bounds.y(),
                to = y;
                "Aligned first gateway branch"
            );
        }

        adjusted
    }
}

impl Default for GatewayAdjuster {
    fn default() -> Self {
        Self::new(0.5)
    }
}
