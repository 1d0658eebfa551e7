// a minimal DIMACS min-cost-flow reader, test-only: drives the public API with the
// equivalent call sequence so a DIMACS-shaped instance can be round-tripped
use ssp_mincostflow::Solver;

fn load_dimacs(text: &str) -> (Solver<i64, i64>, usize) {
    let mut solver: Option<Solver<i64, i64>> = None;
    let mut num_arcs = 0usize;

    for line in text.lines() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("c") | None => continue,
            Some("p") => {
                let kind = fields.next().expect("missing problem kind");
                assert_eq!(kind, "min", "only `p min` instances are supported");
                let n: usize = fields.next().unwrap().parse().unwrap();
                let m: usize = fields.next().unwrap().parse().unwrap();
                num_arcs = m;
                solver = Some(Solver::new(n, m));
            }
            Some("n") => {
                let id: usize = fields.next().unwrap().parse().unwrap();
                let supply: i64 = fields.next().unwrap().parse().unwrap();
                solver.as_mut().unwrap().add_node_excess(id - 1, supply);
            }
            Some("a") => {
                let tail: usize = fields.next().unwrap().parse().unwrap();
                let head: usize = fields.next().unwrap().parse().unwrap();
                let lower: i64 = fields.next().unwrap().parse().unwrap();
                let upper: i64 = fields.next().unwrap().parse().unwrap();
                let cost: i64 = fields.next().unwrap().parse().unwrap();
                solver.as_mut().unwrap().add_edge(tail - 1, head - 1, lower, upper, cost);
            }
            Some(other) => panic!("unrecognized DIMACS record `{other}`"),
        }
    }

    (solver.expect("instance missing a `p` line"), num_arcs)
}

#[test]
fn dimacs_round_trip_matches_native_construction() {
    let dimacs = "\
c six-node instance, DIMACS min-cost-flow format
p min 6 8
n 1 10
n 6 -10
a 1 2 0 4 1
a 1 3 0 8 5
a 2 3 0 5 0
a 3 5 0 10 1
a 4 2 0 8 1
a 4 6 0 8 1
a 5 4 0 8 0
a 5 6 0 8 9
";

    let (mut from_dimacs, num_arcs) = load_dimacs(dimacs);
    assert_eq!(num_arcs, 8);
    let obj = from_dimacs.solve();
    assert_eq!(obj, 70);

    let mut native: Solver<i64, i64> = Solver::new(6, 8);
    native.add_edge(0, 1, 0, 4, 1);
    native.add_edge(0, 2, 0, 8, 5);
    native.add_edge(1, 2, 0, 5, 0);
    native.add_edge(2, 4, 0, 10, 1);
    native.add_edge(3, 1, 0, 8, 1);
    native.add_edge(3, 5, 0, 8, 1);
    native.add_edge(4, 3, 0, 8, 0);
    native.add_edge(4, 5, 0, 8, 9);
    native.add_node_excess(0, 10);
    native.add_node_excess(5, -10);
    assert_eq!(native.solve(), obj);
}
