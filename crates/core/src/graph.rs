use std::collections::HashMap;

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;

use crate::registry::TaskRegistry;
use crate::results::DependencyGraphResult;

/// Build the task dependency graph for inspection.
///
/// Edges point from a task to each of its dependencies. Unlike resolution this
/// never fails: dependencies on unregistered tasks are collected into
/// `missing_dependencies` and every cycle in the registry is reported, not
/// just the first one reachable from some target.
pub fn build_dependency_graph(registry: &TaskRegistry) -> DependencyGraphResult {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();

    for task in registry.tasks() {
        let node_index = graph.add_node(task.name.clone());
        node_indices.insert(task.name.clone(), node_index);
    }

    let mut missing_dependencies = Vec::new();
    for task in registry.tasks() {
        let from_node = node_indices[&task.name];
        for dep in &task.dependencies {
            match node_indices.get(dep) {
                // Skip duplicate declarations so each dependency is one edge
                Some(&to_node) if graph.contains_edge(from_node, to_node) => {}
                Some(&to_node) => {
                    graph.add_edge(from_node, to_node, ());
                }
                None => missing_dependencies.push((task.name.clone(), dep.clone())),
            }
        }
    }

    // Detect cycles using strongly connected components
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();

    cycles.sort();

    DependencyGraphResult {
        graph,
        cycles,
        missing_dependencies,
    }
}

/// Direct dependencies of `task` in the graph, in declaration order
pub fn dependencies_of(graph: &DiGraph<String, ()>, task: &str) -> Vec<String> {
    let Some(node) = graph.node_indices().find(|n| graph[*n] == task) else {
        return Vec::new();
    };
    // petgraph yields neighbors most recently added first
    let mut deps: Vec<String> = graph.neighbors(node).map(|n| graph[n].clone()).collect();
    deps.reverse();
    deps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_graph_without_cycles() {
        let mut registry = TaskRegistry::new();
        registry.register_group("build", none()).unwrap();
        registry.register_group("test", ["build"]).unwrap();
        registry.register_group("ci", ["build", "test", "build"]).unwrap();

        let result = build_dependency_graph(&registry);
        assert_eq!(result.graph.node_count(), 3);
        assert_eq!(result.graph.edge_count(), 3);
        assert!(result.cycles.is_empty());
        assert!(result.missing_dependencies.is_empty());
        assert_eq!(dependencies_of(&result.graph, "ci"), ["build", "test"]);
        assert!(dependencies_of(&result.graph, "build").is_empty());
    }

    #[test]
    fn test_cycle_detection_in_dependency_graph() {
        let mut registry = TaskRegistry::new();
        registry.register_group("a", ["b"]).unwrap();
        registry.register_group("b", ["a"]).unwrap();
        registry.register_group("self", ["self"]).unwrap();
        registry.register_group("ok", none()).unwrap();

        let result = build_dependency_graph(&registry);
        assert_eq!(
            result.cycles,
            vec![vec!["a".to_string(), "b".to_string()], vec!["self".to_string()]]
        );
    }

    #[test]
    fn test_missing_dependencies_are_collected() {
        let mut registry = TaskRegistry::new();
        registry.register_group("deploy", ["build", "publish"]).unwrap();
        registry.register_group("build", none()).unwrap();

        let result = build_dependency_graph(&registry);
        assert_eq!(
            result.missing_dependencies,
            vec![("deploy".to_string(), "publish".to_string())]
        );
        assert_eq!(result.graph.edge_count(), 1);
    }
}
