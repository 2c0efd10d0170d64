//! Score-based weak orders.

use super::WeakOrder;
use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::ActionId;

impl BipolarDigraph {
    /// Weak order by decreasing net flows; fictive nodes contribute all their members.
    pub fn net_flows_order(&self) -> WeakOrder {
        WeakOrder::from_scores(&self.member_lists(), &self.net_flows())
    }

    /// Weak order by decreasing Copeland scores.
    pub fn copeland_order(&self) -> WeakOrder {
        WeakOrder::from_scores(&self.member_lists(), &self.copeland_scores())
    }

    fn member_lists(&self) -> Vec<Vec<ActionId>> {
        self.nodes().iter().map(|n| n.members.clone()).collect()
    }
}
