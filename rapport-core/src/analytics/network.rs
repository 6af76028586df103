//! Relationship network graph layout.
//!
//! Builds a radial node/edge description for visualization: one fixed
//! center node for the account holder, one node per top-scored contact,
//! and an edge from the center to each contact.
//!
//! Angular positions are a uniformly random draw per node, so the layout
//! is intentionally unstable between calls. Callers that need a
//! reproducible layout (tests, snapshots) inject a seeded [`Rng`] instead
//! of relying on a platform default.

use crate::types::{ContactScoreSummary, RelationshipCategory};
use rand::Rng;
use serde::Serialize;

/// At most this many highest-score contacts appear in the graph.
pub const MAX_GRAPH_NODES: usize = 50;

/// Identifier of the fixed center node.
pub const CENTER_NODE_ID: &str = "me";

const MIN_NODE_SIZE: f64 = 10.0;
const MAX_NODE_SIZE: f64 = 30.0;
const MAX_EDGE_WIDTH: f64 = 5.0;
const MAX_EDGE_OPACITY: f64 = 1.0;

/// One node of the network graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    /// Visual size, ln(message_count + 1)·3 clamped to [10, 30]
    pub size: f64,
    pub x: f64,
    pub y: f64,
    /// Score-threshold bucket; `None` for the center node
    pub category: Option<RelationshipCategory>,
    pub score: f64,
}

/// An edge from the center to one contact node.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    /// Monotone in score, capped at 5
    pub width: f64,
    /// Monotone in score, capped at 1
    pub opacity: f64,
}

/// Legend entry for one of the four fixed categories.
#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub category: RelationshipCategory,
    pub label: &'static str,
}

/// The full graph description. A pure view artifact with no identity
/// beyond the producing call.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub legend: Vec<LegendEntry>,
}

/// Build the graph from the score-descending summary list.
///
/// An empty list produces `None` (the report omits the graph).
pub fn build_network_graph<R: Rng + ?Sized>(
    summaries: &[ContactScoreSummary],
    rng: &mut R,
) -> Option<NetworkGraph> {
    if summaries.is_empty() {
        return None;
    }

    let top = &summaries[..summaries.len().min(MAX_GRAPH_NODES)];

    let mut nodes = Vec::with_capacity(top.len() + 1);
    let mut edges = Vec::with_capacity(top.len());

    nodes.push(GraphNode {
        id: CENTER_NODE_ID.to_string(),
        name: "Me".to_string(),
        size: MAX_NODE_SIZE,
        x: 0.0,
        y: 0.0,
        category: None,
        score: 10.0,
    });

    for summary in top {
        let size = (((summary.message_count + 1) as f64).ln() * 3.0)
            .clamp(MIN_NODE_SIZE, MAX_NODE_SIZE);
        // Higher score pulls the node closer to the center.
        let distance = (10.0 - summary.score) * 30.0;
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);

        nodes.push(GraphNode {
            id: summary.contact_id.clone(),
            name: summary.display_name.clone(),
            size,
            x: distance * angle.cos(),
            y: distance * angle.sin(),
            category: Some(summary.category()),
            score: summary.score,
        });
        edges.push(GraphEdge {
            source: CENTER_NODE_ID.to_string(),
            target: summary.contact_id.clone(),
            width: (summary.score / 2.0).min(MAX_EDGE_WIDTH),
            opacity: (summary.score / 10.0).min(MAX_EDGE_OPACITY),
        });
    }

    let legend = RelationshipCategory::ALL
        .iter()
        .map(|&category| LegendEntry {
            category,
            label: category.display_name(),
        })
        .collect();

    Some(NetworkGraph {
        nodes,
        edges,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DimensionScores;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn summary(id: &str, score: f64, message_count: u64) -> ContactScoreSummary {
        ContactScoreSummary {
            contact_id: id.to_string(),
            display_name: id.to_uppercase(),
            score,
            message_count,
            active_days: 5,
            last_chat_date: None,
            relationship_status: "active".to_string(),
            freshness: 0.8,
            dimensions: DimensionScores::default(),
        }
    }

    #[test]
    fn test_empty_list_yields_no_graph() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(build_network_graph(&[], &mut rng).is_none());
    }

    #[test]
    fn test_node_and_edge_shape() {
        let summaries = vec![summary("a", 9.0, 1000), summary("b", 3.0, 10)];
        let mut rng = StdRng::seed_from_u64(42);
        let graph = build_network_graph(&summaries, &mut rng).unwrap();

        assert_eq!(graph.nodes.len(), 3, "center plus one node per contact");
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.legend.len(), 4);

        let center = &graph.nodes[0];
        assert_eq!(center.id, CENTER_NODE_ID);
        assert_eq!((center.x, center.y), (0.0, 0.0));
        assert!(center.category.is_none());

        for edge in &graph.edges {
            assert_eq!(edge.source, CENTER_NODE_ID);
            assert!(edge.width <= 5.0);
            assert!(edge.opacity <= 1.0);
        }
        // Width and opacity scale with score.
        assert!(graph.edges[0].width > graph.edges[1].width);
        assert!(graph.edges[0].opacity > graph.edges[1].opacity);
    }

    #[test]
    fn test_node_size_clamped() {
        let summaries = vec![summary("tiny", 5.0, 1), summary("huge", 5.0, 10_000_000)];
        let mut rng = StdRng::seed_from_u64(7);
        let graph = build_network_graph(&summaries, &mut rng).unwrap();

        assert_eq!(graph.nodes[1].size, 10.0, "floor at 10");
        assert_eq!(graph.nodes[2].size, 30.0, "ceiling at 30");
    }

    #[test]
    fn test_radial_distance_tracks_score() {
        let summaries = vec![summary("close", 9.0, 100), summary("far", 2.0, 100)];
        let mut rng = StdRng::seed_from_u64(9);
        let graph = build_network_graph(&summaries, &mut rng).unwrap();

        let dist = |n: &GraphNode| (n.x * n.x + n.y * n.y).sqrt();
        assert!((dist(&graph.nodes[1]) - 30.0).abs() < 1e-9);
        assert!((dist(&graph.nodes[2]) - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_caps_at_fifty_contacts() {
        let summaries: Vec<ContactScoreSummary> = (0..80)
            .map(|i| summary(&format!("c{i}"), 5.0, 100))
            .collect();
        let mut rng = StdRng::seed_from_u64(3);
        let graph = build_network_graph(&summaries, &mut rng).unwrap();
        assert_eq!(graph.nodes.len(), MAX_GRAPH_NODES + 1);
        assert_eq!(graph.edges.len(), MAX_GRAPH_NODES);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let summaries = vec![summary("a", 6.0, 50)];
        let first = build_network_graph(&summaries, &mut StdRng::seed_from_u64(11)).unwrap();
        let second = build_network_graph(&summaries, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(first.nodes[1].x, second.nodes[1].x);
        assert_eq!(first.nodes[1].y, second.nodes[1].y);
    }

    #[test]
    fn test_categories_follow_score_thresholds() {
        let summaries = vec![
            summary("a", 8.5, 10),
            summary("b", 6.5, 10),
            summary("c", 4.5, 10),
            summary("d", 1.0, 10),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let graph = build_network_graph(&summaries, &mut rng).unwrap();
        let categories: Vec<_> = graph.nodes[1..]
            .iter()
            .map(|n| n.category.unwrap())
            .collect();
        assert_eq!(
            categories,
            vec![
                RelationshipCategory::InnerCircle,
                RelationshipCategory::SocialCircle,
                RelationshipCategory::WorkCircle,
                RelationshipCategory::Acquaintance,
            ]
        );
    }
}
