//! Star map: planets, warp routes and procedural map generation.
//!
//! The map is a small undirected graph (15 nodes by default). Routes are
//! fixed at generation; only `visited` flags and planetary markets change
//! during a run.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::PLANET_NAMES;
use crate::economy;
use crate::goods::{Ledger, PlanetType};
use crate::rules::Rules;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 7;

/// Identifier of a map node (and of the planet on it).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Random 7-character base-36 identifier.
    fn random(rng: &mut impl Rng) -> Self {
        let id = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer map position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    /// Euclidean distance.
    pub fn distance(&self, other: &Coordinates) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A tradeable world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: NodeId,
    pub name: String,
    pub planet_type: PlanetType,
    pub coordinates: Coordinates,
    /// Unit price the planet charges.
    pub market: Ledger,
    /// Units available for the player to buy.
    pub inventory: Ledger,
    pub description: String,
}

/// A planet plus its place in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub planet: Planet,
    pub visited: bool,
    /// Neighbouring nodes. Symmetric: if A lists B, B lists A.
    pub connections: Vec<NodeId>,
}

impl MapNode {
    pub fn id(&self) -> &NodeId {
        &self.planet.id
    }

    pub fn is_connected_to(&self, other: &NodeId) -> bool {
        self.connections.contains(other)
    }
}

/// All nodes of a run, in generation order. The first node is the start.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarMap {
    nodes: Vec<MapNode>,
}

impl StarMap {
    pub fn from_nodes(nodes: Vec<MapNode>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeId) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut MapNode> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(MapNode::id)
    }

    /// First generated node, where every run begins.
    pub fn start(&self) -> Option<&NodeId> {
        self.nodes.first().map(MapNode::id)
    }

    /// Distance between two nodes, if both exist.
    pub fn distance(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        let a = self.get(a)?;
        let b = self.get(b)?;
        Some(a.planet.coordinates.distance(&b.planet.coordinates))
    }

    fn connect(&mut self, a: usize, b: usize) {
        let id_a = self.nodes[a].id().clone();
        let id_b = self.nodes[b].id().clone();
        self.nodes[a].connections.push(id_b);
        self.nodes[b].connections.push(id_a);
    }

    /// Connected components, each listed in generation order.
    ///
    /// Generation only guarantees every node one neighbour, so a map may
    /// split into several clusters.
    pub fn clusters(&self) -> Vec<Vec<NodeId>> {
        let mut seen: HashSet<&NodeId> = HashSet::new();
        let mut clusters = Vec::new();

        for node in &self.nodes {
            if !seen.insert(node.id()) {
                continue;
            }
            let mut cluster = vec![node.id().clone()];
            let mut queue = VecDeque::from([node]);
            while let Some(current) = queue.pop_front() {
                for next in &current.connections {
                    if let Some(next_node) = self.get(next) {
                        if seen.insert(next_node.id()) {
                            cluster.push(next_node.id().clone());
                            queue.push_back(next_node);
                        }
                    }
                }
            }
            clusters.push(cluster);
        }
        clusters
    }

    pub fn is_fully_connected(&self) -> bool {
        self.clusters().len() <= 1
    }
}

/// Generate a fresh star map.
///
/// Places `rules.node_count` planets uniformly on the grid, stocks their
/// markets, links every pair closer than `rules.connection_distance`, then
/// links any node still isolated to its nearest neighbour (ties go to the
/// earliest generated node).
pub fn generate_map(rules: &Rules, rng: &mut impl Rng) -> StarMap {
    let mut map = StarMap::default();
    let size = rules.map_size.max(1);

    // 1. Planets
    for i in 0..rules.node_count {
        let id = loop {
            let candidate = NodeId::random(rng);
            if !map.contains(&candidate) {
                break candidate;
            }
        };
        let planet_type = PlanetType::ALL[rng.gen_range(0..PlanetType::ALL.len())];
        let name = match PLANET_NAMES.get(i) {
            Some(name) => name.to_string(),
            None => format!("Sector {}", id.as_str().to_uppercase()),
        };

        let mut planet = Planet {
            id,
            name,
            planet_type,
            coordinates: Coordinates {
                x: rng.gen_range(0..size),
                y: rng.gen_range(0..size),
            },
            market: Ledger::zeroed(),
            inventory: Ledger::zeroed(),
            description: format!(
                "A {} in the dark void.",
                planet_type.name().to_lowercase()
            ),
        };
        economy::refresh_market(&mut planet, rng);

        map.nodes.push(MapNode {
            planet,
            visited: false,
            connections: Vec::new(),
        });
    }

    // 2. Routes by distance
    let n = map.nodes.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let a = map.nodes[i].planet.coordinates;
            let b = map.nodes[j].planet.coordinates;
            if a.distance(&b) < rules.connection_distance {
                map.connect(i, j);
            }
        }
    }

    // 3. No orphans
    for i in 0..n {
        if !map.nodes[i].connections.is_empty() {
            continue;
        }
        let here = map.nodes[i].planet.coordinates;
        let mut closest: Option<(usize, f64)> = None;
        for j in 0..n {
            if i == j {
                continue;
            }
            let dist = here.distance(&map.nodes[j].planet.coordinates);
            if closest.map_or(true, |(_, best)| dist < best) {
                closest = Some((j, dist));
            }
        }
        if let Some((j, _)) = closest {
            map.connect(i, j);
        }
    }

    let clusters = map.clusters().len();
    if clusters > 1 {
        log::debug!(
            "Generated star map of {} nodes split into {} clusters",
            n,
            clusters
        );
    }

    map
}
