//! Map topology.
//!
//! A graph holds one node per super-province. Each node has one or more
//! sub-nodes: the main one (empty coast) and one per named coast. Edges run
//! between sub-nodes and carry traversal flags; every edge is also recorded
//! in reverse on its target so searches can run backwards.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::province::{Flags, Nation, Province};

/// One candidate step offered to a path filter.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    /// The province the step would enter.
    pub province: &'a Province,
    /// Flags on the edge being traversed.
    pub edge: Flags,
    /// Flags on the province being entered.
    pub node: Flags,
    /// Home nation of the supply center at the province, if any.
    pub supply_center: Option<&'a Nation>,
    /// Provinces already on the path, excluding the start.
    pub trace: &'a [Province],
}

#[derive(Debug, Clone, Default)]
struct SubNode {
    flags: Flags,
    edges: BTreeMap<Province, Flags>,
    reverse_edges: BTreeMap<Province, Flags>,
}

#[derive(Debug, Clone, Default)]
struct Node {
    subs: BTreeMap<String, SubNode>,
    sc: Option<Nation>,
}

/// Static map topology shared by every state of a game.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<String, Node>,
}

/// BFS frontier entry: the path so far and the edge that produced it.
struct Frontier {
    path: Vec<Province>,
    src: Option<Province>,
    dst: Option<Province>,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder {
            graph: Graph::default(),
        }
    }

    fn sub(&self, p: &Province) -> Option<&SubNode> {
        let (sup, coast) = p.split();
        self.nodes.get(sup).and_then(|node| node.subs.get(coast))
    }

    fn sub_mut(&mut self, p: &Province) -> &mut SubNode {
        let (sup, coast) = p.split();
        self.nodes
            .entry(sup.to_string())
            .or_default()
            .subs
            .entry(coast.to_string())
            .or_default()
    }

    /// True if the exact province (including coast) exists.
    pub fn has(&self, p: &Province) -> bool {
        self.sub(p).is_some()
    }

    /// Flags of the exact sub-node, empty if unknown.
    pub fn flags(&self, p: &Province) -> Flags {
        self.sub(p).map(|s| s.flags).unwrap_or_default()
    }

    /// Union of the flags of every sub-node of the super-province.
    pub fn all_flags(&self, p: &Province) -> Flags {
        self.nodes
            .get(p.split().0)
            .map(|node| node.subs.values().fold(Flags::NONE, |acc, s| acc | s.flags))
            .unwrap_or_default()
    }

    /// Home nation of the supply center at the super-province.
    pub fn sc(&self, p: &Province) -> Option<&Nation> {
        self.nodes.get(p.split().0).and_then(|node| node.sc.as_ref())
    }

    /// Home supply centers of a nation.
    pub fn scs(&self, nation: &Nation) -> Vec<Province> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.sc.as_ref() == Some(nation))
            .map(|(name, _)| Province::new(name.clone()))
            .collect()
    }

    pub fn all_scs(&self) -> Vec<Province> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.sc.is_some())
            .map(|(name, _)| Province::new(name.clone()))
            .collect()
    }

    /// Outgoing edges of the exact sub-node.
    pub fn edges<'a>(&'a self, p: &Province) -> impl Iterator<Item = (&'a Province, Flags)> + 'a {
        self.sub(p)
            .into_iter()
            .flat_map(|s| s.edges.iter().map(|(dst, flags)| (dst, *flags)))
    }

    /// Edges leading into the exact sub-node.
    pub fn reverse_edges<'a>(
        &'a self,
        p: &Province,
    ) -> impl Iterator<Item = (&'a Province, Flags)> + 'a {
        self.sub(p)
            .into_iter()
            .flat_map(|s| s.reverse_edges.iter().map(|(src, flags)| (src, *flags)))
    }

    /// Flags of the edge from `src` to `dst`, if one exists.
    pub fn edge(&self, src: &Province, dst: &Province) -> Option<Flags> {
        self.sub(src).and_then(|s| s.edges.get(dst).copied())
    }

    /// Every sub-node of the super-province, main node first.
    pub fn coasts(&self, p: &Province) -> Vec<Province> {
        let sup = p.super_province();
        self.nodes
            .get(sup.as_str())
            .map(|node| node.subs.keys().map(|coast| sup.join(coast)).collect())
            .unwrap_or_default()
    }

    /// Every sub-node in the graph.
    pub fn provinces(&self) -> Vec<Province> {
        self.nodes
            .iter()
            .flat_map(|(name, node)| {
                let sup = Province::new(name.clone());
                node.subs.keys().map(move |coast| sup.join(coast))
            })
            .collect()
    }

    /// Nations owning at least one home supply center.
    pub fn nations(&self) -> Vec<Nation> {
        let found: BTreeSet<&Nation> = self
            .nodes
            .values()
            .filter_map(|node| node.sc.as_ref())
            .filter(|nation| !nation.is_neutral())
            .collect();
        found.into_iter().cloned().collect()
    }

    /// Breadth-first search from `first` to `last`.
    ///
    /// `filter` decides whether each candidate step may be taken. The result
    /// excludes `first` and ends with `last`. With `last == None` the search
    /// explores everything the filter admits and returns `None`, which lets
    /// the filter act as a visitor. With `reverse` the edges are followed
    /// backwards.
    pub fn path<F>(
        &self,
        first: &Province,
        last: Option<&Province>,
        reverse: bool,
        mut filter: F,
    ) -> Option<Vec<Province>>
    where
        F: FnMut(&Step<'_>) -> bool,
    {
        let start = if reverse {
            Frontier {
                path: Vec::new(),
                src: Some(first.clone()),
                dst: None,
            }
        } else {
            Frontier {
                path: Vec::new(),
                src: None,
                dst: Some(first.clone()),
            }
        };
        let mut queue = vec![start];
        let mut seen: HashSet<(Option<Province>, Option<Province>)> = HashSet::new();

        while !queue.is_empty() {
            let mut next_queue = Vec::new();
            for step in queue {
                if !seen.insert((step.src.clone(), step.dst.clone())) {
                    continue;
                }
                let at = if reverse { &step.src } else { &step.dst };
                let Some(at) = at.as_ref().and_then(|p| self.sub(p)) else {
                    continue;
                };
                let edges = if reverse {
                    &at.reverse_edges
                } else {
                    &at.edges
                };
                for (name, edge) in edges {
                    if name == first || step.path.contains(name) {
                        continue;
                    }
                    let candidate = Step {
                        province: name,
                        edge: *edge,
                        node: self.flags(name),
                        supply_center: self.sc(name),
                        trace: &step.path,
                    };
                    if !filter(&candidate) {
                        continue;
                    }
                    let mut path = step.path.clone();
                    path.push(name.clone());
                    if last == Some(name) {
                        return Some(path);
                    }
                    next_queue.push(if reverse {
                        Frontier {
                            path,
                            src: Some(name.clone()),
                            dst: step.src.clone(),
                        }
                    } else {
                        Frontier {
                            path,
                            src: step.dst.clone(),
                            dst: Some(name.clone()),
                        }
                    });
                }
            }
            queue = next_queue;
        }
        None
    }
}

/// Fluent graph construction: `Graph::builder().prov("a").conn("b", ..)`.
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Starts (or reopens) a sub-node.
    pub fn prov(mut self, name: &str) -> SubBuilder {
        let current = Province::from(name);
        self.graph.sub_mut(&current);
        SubBuilder {
            graph: self.graph,
            current,
        }
    }

    pub fn done(self) -> Graph {
        self.graph
    }
}

/// Builder positioned on one sub-node.
pub struct SubBuilder {
    graph: Graph,
    current: Province,
}

impl SubBuilder {
    /// Adds an edge from the current sub-node to `name`, plus its reverse.
    pub fn conn(mut self, name: &str, flags: Flags) -> Self {
        let target = Province::from(name);
        self.graph
            .sub_mut(&self.current)
            .edges
            .insert(target.clone(), flags);
        self.graph
            .sub_mut(&target)
            .reverse_edges
            .insert(self.current.clone(), flags);
        self
    }

    pub fn flag(mut self, flags: Flags) -> Self {
        let sub = self.graph.sub_mut(&self.current);
        sub.flags = sub.flags | flags;
        self
    }

    /// Marks the super-province as a supply center with the given home nation.
    pub fn sc(mut self, nation: Nation) -> Self {
        let sup = self.current.split().0.to_string();
        self.graph.nodes.entry(sup).or_default().sc = Some(nation);
        self
    }

    pub fn prov(self, name: &str) -> SubBuilder {
        GraphBuilder { graph: self.graph }.prov(name)
    }

    pub fn done(self) -> Graph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a - b - c on land, plus a sea lane a ~ s ~ c, and b with two coasts.
    fn small_graph() -> Graph {
        Graph::builder()
            .prov("a")
            .conn("b", Flags::LAND)
            .conn("s", Flags::SEA)
            .flag(Flags::COAST)
            .sc(Nation::new("Red"))
            .prov("b")
            .conn("a", Flags::LAND)
            .conn("c", Flags::LAND)
            .flag(Flags::LAND)
            .sc(Nation::NEUTRAL)
            .prov("b/nc")
            .conn("s", Flags::SEA)
            .flag(Flags::SEA)
            .prov("c")
            .conn("b", Flags::LAND)
            .conn("s", Flags::SEA)
            .flag(Flags::COAST)
            .sc(Nation::new("Blue"))
            .prov("s")
            .conn("a", Flags::SEA)
            .conn("b/nc", Flags::SEA)
            .conn("c", Flags::SEA)
            .flag(Flags::SEA)
            .done()
    }

    #[test]
    fn has_is_exact() {
        let g = small_graph();
        assert!(g.has(&"b".into()));
        assert!(g.has(&"b/nc".into()));
        assert!(!g.has(&"b/sc".into()));
        assert!(!g.has(&"x".into()));
    }

    #[test]
    fn flags_and_all_flags() {
        let g = small_graph();
        assert_eq!(g.flags(&"b".into()), Flags::LAND);
        assert_eq!(g.flags(&"b/nc".into()), Flags::SEA);
        assert_eq!(g.all_flags(&"b/nc".into()), Flags::COAST);
        assert!(g.flags(&"x".into()).is_empty());
    }

    #[test]
    fn coasts_main_node_first() {
        let g = small_graph();
        let coasts = g.coasts(&"b/nc".into());
        assert_eq!(coasts, vec![Province::from("b"), Province::from("b/nc")]);
        assert_eq!(g.coasts(&"a".into()), vec![Province::from("a")]);
    }

    #[test]
    fn supply_centers() {
        let g = small_graph();
        assert_eq!(g.sc(&"b/nc".into()), Some(&Nation::NEUTRAL));
        assert_eq!(g.scs(&Nation::new("Red")), vec![Province::from("a")]);
        assert_eq!(g.all_scs().len(), 3);
        assert_eq!(g.nations(), vec![Nation::new("Blue"), Nation::new("Red")]);
    }

    #[test]
    fn reverse_edges_mirror_edges() {
        let g = small_graph();
        let into_s: Vec<&Province> = g.reverse_edges(&"s".into()).map(|(p, _)| p).collect();
        assert_eq!(into_s.len(), 3);
        assert_eq!(g.edge(&"b/nc".into(), &"s".into()), Some(Flags::SEA));
        assert_eq!(g.edge(&"b".into(), &"s".into()), None);
    }

    #[test]
    fn path_shortest_by_hops() {
        let g = small_graph();
        let path = g.path(&"a".into(), Some(&"c".into()), false, |_| true);
        assert_eq!(path.map(|p| p.len()), Some(2));
    }

    #[test]
    fn path_respects_filter() {
        let g = small_graph();
        let land = g.path(&"a".into(), Some(&"c".into()), false, |s| s.edge.land());
        assert_eq!(land, Some(vec![Province::from("b"), Province::from("c")]));
        let sea = g.path(&"a".into(), Some(&"c".into()), false, |s| s.edge.sea());
        assert_eq!(sea, Some(vec![Province::from("s"), Province::from("c")]));
        let none = g.path(&"a".into(), Some(&"c".into()), false, |_| false);
        assert_eq!(none, None);
    }

    #[test]
    fn path_without_target_visits_every_reachable_province() {
        let g = small_graph();
        let mut visited = Vec::new();
        let result = g.path(&"a".into(), None, false, |s| {
            assert!(!s.trace.contains(s.province));
            visited.push(s.province.clone());
            true
        });
        assert_eq!(result, None);
        for p in ["b", "b/nc", "c", "s"] {
            assert!(visited.contains(&Province::from(p)), "missing {}", p);
        }
        assert!(!visited.contains(&Province::from("a")));
    }

    #[test]
    fn reverse_path_follows_incoming_edges() {
        let g = Graph::builder()
            .prov("x")
            .conn("y", Flags::LAND)
            .prov("y")
            .conn("z", Flags::LAND)
            .prov("z")
            .done();
        assert_eq!(g.path(&"z".into(), Some(&"x".into()), false, |_| true), None);
        assert_eq!(
            g.path(&"z".into(), Some(&"x".into()), true, |_| true),
            Some(vec![Province::from("y"), Province::from("x")])
        );
    }
}
