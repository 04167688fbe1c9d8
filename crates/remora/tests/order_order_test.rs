use remora::graphlib::Graph;
use remora::{NodeLabel, OrderOptions, cross_count, init_order, order, util};

fn new_graph() -> Graph<NodeLabel, (), ()> {
    Graph::new()
}

fn new_cg() -> Graph<(), (), ()> {
    Graph::new()
}

fn set_path(g: &mut Graph<NodeLabel, (), ()>, path: &[&str]) {
    for w in path.windows(2) {
        g.set_edge(w[0], w[1]);
    }
}

fn permutations(items: &[String]) -> Vec<Vec<String>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            let mut perm = vec![head.clone()];
            perm.append(&mut tail);
            out.push(perm);
        }
    }
    out
}

// Exhaustive minimum over every within-rank permutation. Only viable for tiny graphs,
// which is exactly what makes it a trustworthy oracle.
fn brute_force_min(g: &Graph<NodeLabel, (), ()>, layering: &[Vec<String>]) -> usize {
    fn rec(
        g: &Graph<NodeLabel, (), ()>,
        layering: &mut Vec<Vec<String>>,
        i: usize,
        best: &mut usize,
    ) {
        if i == layering.len() {
            *best = (*best).min(cross_count(g, layering));
            return;
        }
        for perm in permutations(&layering[i].clone()) {
            layering[i] = perm;
            rec(g, layering, i + 1, best);
        }
    }

    let mut work = layering.to_vec();
    let mut best = usize::MAX;
    rec(g, &mut work, 0, &mut best);
    best
}

#[test]
fn order_does_not_add_crossings_to_a_tree_structure() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::at_rank(0));
    for v in ["b", "e"] {
        g.set_node(v, NodeLabel::at_rank(1));
    }
    for v in ["c", "d", "f"] {
        g.set_node(v, NodeLabel::at_rank(2));
    }
    set_path(&mut g, &["a", "b", "c"]);
    g.set_edge("b", "d");
    set_path(&mut g, &["a", "e", "f"]);

    let cg = new_cg();
    let layering = order(&mut g, &cg, OrderOptions::default());
    assert_eq!(cross_count(&g, &layering), 0);
}

#[test]
fn order_never_yields_more_crossings_than_the_initial_layering() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::at_rank(0));
    for v in ["b", "e", "g"] {
        g.set_node(v, NodeLabel::at_rank(1));
    }
    for v in ["c", "f", "h"] {
        g.set_node(v, NodeLabel::at_rank(2));
    }
    g.set_node("d", NodeLabel::at_rank(3));
    set_path(&mut g, &["a", "b", "c", "d"]);
    set_path(&mut g, &["a", "e", "f", "d"]);
    set_path(&mut g, &["a", "g", "h", "d"]);
    g.set_edge("b", "h");
    g.set_edge("g", "c");

    let initial_cc = cross_count(&g, &init_order(&g));

    let cg = new_cg();
    let layering = order(&mut g, &cg, OrderOptions::default());
    assert!(cross_count(&g, &layering) <= initial_cc);
}

#[test]
fn order_matches_the_brute_force_minimum_for_every_initial_ordering() {
    let rank1_orders = [["B", "C"], ["C", "B"]];
    let rank2_orders = [["D", "E"], ["E", "D"]];

    for rank1 in rank1_orders {
        for rank2 in rank2_orders {
            let mut g = new_graph();
            g.set_node("A", NodeLabel::at_rank(0));
            for v in rank1 {
                g.set_node(v, NodeLabel::at_rank(1));
            }
            for v in rank2 {
                g.set_node(v, NodeLabel::at_rank(2));
            }
            g.set_edge("A", "C");
            g.set_edge("A", "B");
            g.set_edge("B", "E");
            g.set_edge("C", "D");
            g.set_edge("C", "E");

            let optimum = brute_force_min(&g, &init_order(&g));

            let cg = new_cg();
            let layering = order(&mut g, &cg, OrderOptions::default());
            assert_eq!(
                cross_count(&g, &layering),
                optimum,
                "initial ordering {rank1:?} / {rank2:?}"
            );
        }
    }
}

#[test]
fn order_produces_a_valid_layering() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::at_rank(0));
    g.set_node("b", NodeLabel::at_rank(0));
    g.set_node("c", NodeLabel::at_rank(1));
    g.set_node("d", NodeLabel::at_rank(1));
    g.set_node("e", NodeLabel::at_rank(1));
    g.set_edge("a", "d");
    g.set_edge("b", "c");
    g.set_edge("b", "e");

    let cg = new_cg();
    let layering = order(&mut g, &cg, OrderOptions::default());

    assert_eq!(layering.len(), 2);
    for (rank, layer) in layering.iter().enumerate() {
        let mut expected: Vec<String> = g
            .nodes()
            .filter(|v| g.node(v).unwrap().rank == Some(rank as i32))
            .map(|v| v.to_string())
            .collect();
        let mut got = layer.clone();
        expected.sort();
        got.sort();
        assert_eq!(got, expected, "layer {rank}");
    }
}

#[test]
fn order_writes_positions_that_reproduce_the_returned_layering() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::at_rank(0));
    g.set_node("b", NodeLabel::at_rank(0));
    g.set_node("x", NodeLabel::at_rank(1));
    g.set_node("y", NodeLabel::at_rank(1));
    g.set_edge("a", "y");
    g.set_edge("b", "x");

    let cg = new_cg();
    let layering = order(&mut g, &cg, OrderOptions::default());
    assert_eq!(util::build_layer_matrix(&g), layering);

    for layer in &layering {
        for (idx, v) in layer.iter().enumerate() {
            assert_eq!(g.node(v).unwrap().order, Some(idx));
        }
    }
}

#[test]
fn order_respects_left_of_constraints() {
    // The crossing-free arrangement would swap x and y; the constraint holds them.
    let mut g = new_graph();
    g.set_node("a", NodeLabel::at_rank(0));
    g.set_node("b", NodeLabel::at_rank(0));
    g.set_node("x", NodeLabel::at_rank(1));
    g.set_node("y", NodeLabel::at_rank(1));
    g.set_edge("a", "y");
    g.set_edge("b", "x");

    let mut cg = new_cg();
    cg.set_edge("x", "y");

    order(&mut g, &cg, OrderOptions::default());

    let x_order = g.node("x").unwrap().order.unwrap();
    let y_order = g.node("y").unwrap().order.unwrap();
    assert!(x_order < y_order);
}

#[test]
fn order_resolves_the_crossing_by_moving_the_unconstrained_layer() {
    // Same graph as above: with x locked left of y, the optimizer still reaches zero
    // crossings by reordering rank 0 on the upward pass.
    let mut g = new_graph();
    g.set_node("a", NodeLabel::at_rank(0));
    g.set_node("b", NodeLabel::at_rank(0));
    g.set_node("x", NodeLabel::at_rank(1));
    g.set_node("y", NodeLabel::at_rank(1));
    g.set_edge("a", "y");
    g.set_edge("b", "x");

    let mut cg = new_cg();
    cg.set_edge("x", "y");

    let layering = order(&mut g, &cg, OrderOptions::default());
    assert_eq!(cross_count(&g, &layering), 0);
    assert_eq!(layering[1], vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn order_handles_a_single_rank() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::at_rank(0));
    g.set_node("b", NodeLabel::at_rank(0));

    let cg = new_cg();
    let layering = order(&mut g, &cg, OrderOptions::default());
    assert_eq!(layering, vec![vec!["a".to_string(), "b".to_string()]]);
    assert_eq!(g.node("a").unwrap().order, Some(0));
    assert_eq!(g.node("b").unwrap().order, Some(1));
}

#[test]
fn order_handles_an_empty_graph() {
    let mut g = new_graph();
    let cg = new_cg();
    assert_eq!(order(&mut g, &cg, OrderOptions::default()), Vec::<Vec<String>>::new());
}

#[test]
fn order_honors_the_iteration_budget() {
    // With x held left of y, only the upward pass can clear the crossing by reordering
    // rank 0, and a budget of one round never runs it.
    let mut g = new_graph();
    g.set_node("a", NodeLabel::at_rank(0));
    g.set_node("b", NodeLabel::at_rank(0));
    g.set_node("x", NodeLabel::at_rank(1));
    g.set_node("y", NodeLabel::at_rank(1));
    g.set_edge("a", "y");
    g.set_edge("b", "x");

    let mut cg = new_cg();
    cg.set_edge("x", "y");

    let layering = order(
        &mut g,
        &cg,
        OrderOptions {
            iterations: 1,
            ..Default::default()
        },
    );
    assert_eq!(cross_count(&g, &layering), 1);
}
