use ssp_mincostflow::Solver;

fn main() {
    let mut solver: Solver<i64, i64> = Solver::new(6, 8);

    let edges = vec![
        solver.add_edge(0, 1, 0, 4, 1),
        solver.add_edge(0, 2, 0, 8, 5),
        solver.add_edge(1, 2, 0, 5, 0),
        solver.add_edge(2, 4, 0, 10, 1),
        solver.add_edge(3, 1, 0, 8, 1),
        solver.add_edge(3, 5, 0, 8, 1),
        solver.add_edge(4, 3, 0, 8, 0),
        solver.add_edge(4, 5, 0, 8, 9),
    ];

    solver.add_node_excess(0, 10);
    solver.add_node_excess(5, -10);

    let total_cost = solver.solve();

    println!("minimum cost: {total_cost}");
    for e in edges {
        println!("{} -> {}: flow {}", solver.tail(e), solver.head(e), solver.flow(e));
    }
}
