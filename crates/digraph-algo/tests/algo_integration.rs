// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use digraph_algo::{
    Path, compute_scc_graph, compute_strongly_connected_components, find_cycles,
    find_k_shortest_paths, find_nodes_between, find_path, iterate_simple_cycles,
    topological_order,
};
use digraph_common::{CancelFlag, Graph, NeverCancelled, SimpleGraph};
use fxhash::FxHashSet;

fn names(path: &Path<String>) -> Vec<&str> {
    path.nodes.iter().map(String::as_str).collect()
}

fn node(name: &str) -> String {
    name.to_string()
}

#[test]
fn test_cycles_through_node() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let graph = SimpleGraph::parse_edge_list(
        "
        A -> B -> C -> A
        C -> D
        ",
    )?;

    let cycles = find_cycles(&graph, &node("C"));

    // The cycle is reported as the successor-to-predecessor path followed by
    // the queried node, so it starts at C's successor A and ends at C.
    assert_eq!(cycles.len(), 1);
    let cycle = cycles.iter().next().unwrap();
    assert_eq!(names(cycle), vec!["A", "B", "C"]);
    Ok(())
}

#[test]
fn test_k_shortest_paths_diamond() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let graph = SimpleGraph::parse_edge_list(
        "
        S -> A -> T
        S -> B -> T
        ",
    )?;

    let paths = find_k_shortest_paths(&graph, &node("S"), &node("T"), 3, &NeverCancelled);

    assert_eq!(paths.len(), 2);
    let found: FxHashSet<Vec<&str>> = paths.iter().map(names).collect();
    assert!(found.contains(&vec!["S", "A", "T"]));
    assert!(found.contains(&vec!["S", "B", "T"]));
    Ok(())
}

#[test]
fn test_k_shortest_paths_ordering_on_layered_graph() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    // Two ways through each of three layers plus a shortcut.
    let graph = SimpleGraph::parse_edge_list(
        "
        s -> a1 -> m1 -> b1 -> t
        s -> a2 -> m1 -> b2 -> t
        s -> t
        ",
    )?;

    let paths = find_k_shortest_paths(&graph, &node("s"), &node("t"), 10, &NeverCancelled);

    assert_eq!(paths.len(), 5);
    assert_eq!(names(&paths[0]), vec!["s", "t"]);
    assert!(paths[1..].iter().all(|p| p.len() == 4));
    let distinct: FxHashSet<_> = paths.iter().map(names).collect();
    assert_eq!(distinct.len(), 5);
    Ok(())
}

#[test]
fn test_k_shortest_paths_cancelled() -> anyhow::Result<()> {
    let graph = SimpleGraph::parse_edge_list("a -> b -> c\na -> c")?;
    let flag = CancelFlag::new();
    flag.cancel();

    let paths = find_k_shortest_paths(&graph, &node("a"), &node("c"), 5, &flag);
    assert!(paths.is_empty());
    Ok(())
}

#[test]
fn test_shortest_path_prefers_fewest_hops() -> anyhow::Result<()> {
    let graph = SimpleGraph::parse_edge_list(
        "
        # long way round
        a -> b -> c -> d -> e
        # shortcut
        a -> x -> e
        ",
    )?;

    let path = find_path(&graph, &node("a"), &node("e")).unwrap();
    assert_eq!(names(&path), vec!["a", "x", "e"]);
    assert!(find_path(&graph, &node("e"), &node("a")).is_none());
    Ok(())
}

#[test]
fn test_scc_graph_direction() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    // lib depends on core: lib -> core. {app, ui} form a cycle on top.
    let graph = SimpleGraph::parse_edge_list(
        "
        app -> ui -> app
        ui -> lib -> core
        ",
    )?;

    let sccs = compute_scc_graph(&graph);
    assert_eq!(sccs.component_count(), 3);

    let top = sccs.component_of(&node("app")).unwrap().clone();
    let lib = sccs.component_of(&node("lib")).unwrap().clone();
    let core = sccs.component_of(&node("core")).unwrap().clone();
    assert_eq!(top.len(), 2);

    // Component edges follow the original edges.
    assert_eq!(sccs.successors(&top).collect::<Vec<_>>(), vec![lib.clone()]);
    assert_eq!(sccs.predecessors(&lib).collect::<Vec<_>>(), vec![top.clone()]);
    assert_eq!(sccs.predecessors(&core).collect::<Vec<_>>(), vec![lib.clone()]);
    assert!(sccs.predecessors(&top).next().is_none());

    let components = compute_strongly_connected_components(&graph);
    assert_eq!(components.len(), 3);
    Ok(())
}

#[test]
fn test_iterate_simple_cycles() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let graph = SimpleGraph::parse_edge_list(
        "
        a -> b -> c -> a
        b -> a
        c -> c
        d -> a
        ",
    )?;

    let mut cycles = Vec::new();
    iterate_simple_cycles(&graph, |cycle| cycles.push(names(&cycle).join(",")));
    cycles.sort();

    assert_eq!(cycles, vec!["a,b", "a,b,c", "c"]);
    Ok(())
}

#[test]
fn test_nodes_between_and_topological_order() -> anyhow::Result<()> {
    let graph = SimpleGraph::parse_edge_list(
        "
        a -> b -> d
        a -> c -> d
        d -> e
        x -> d
        ",
    )?;

    let between = find_nodes_between(&graph, &node("a"), &node("d"));
    let mut between: Vec<_> = between.iter().map(String::as_str).collect();
    between.sort();
    assert_eq!(between, vec!["a", "b", "c", "d"]);

    let order = topological_order(&graph);
    assert!(order.is_acyclic());
    for (from, to) in graph.edges() {
        assert_eq!(order.compare(&from, &to), std::cmp::Ordering::Less);
    }
    Ok(())
}
