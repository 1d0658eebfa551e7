use crate::arc::Arc;
use crate::cmp;
use crate::heap::PriorityQueue;
use crate::node::Node;
use num_traits::NumAssign;
use std::ops::Neg;

pub struct Solver<Flow, Cost> {
    nodes: Vec<Node<Flow, Cost>>,
    arcs: Vec<Arc<Flow, Cost>>,
    // upper bound at even indices, lower bound at odd indices, parallel to `arcs`
    capacity: Vec<Flow>,

    max_edges: usize,
    edge_num: usize,

    active_head: Option<usize>,
    scan_counter: u64,
    total_cost: Cost,

    queue: PriorityQueue<Cost>,
}

impl<Flow, Cost> Clone for Solver<Flow, Cost>
where
    Flow: Clone,
    Cost: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            arcs: self.arcs.clone(),
            capacity: self.capacity.clone(),
            max_edges: self.max_edges,
            edge_num: self.edge_num,
            active_head: self.active_head,
            scan_counter: self.scan_counter,
            total_cost: self.total_cost.clone(),
            queue: self.queue.clone(),
        }
    }
}

impl<Flow, Cost> Solver<Flow, Cost>
where
    Flow: NumAssign + PartialOrd + Neg<Output = Flow> + Copy,
    Cost: NumAssign + PartialOrd + Neg<Output = Cost> + Copy,
{
    pub fn new(num_nodes: usize, max_edges: usize) -> Self {
        Self {
            nodes: (0..num_nodes).map(|_| Node::new()).collect(),
            arcs: (0..2 * max_edges).map(|_| Arc::empty()).collect(),
            capacity: vec![Flow::zero(); 2 * max_edges],
            max_edges,
            edge_num: 0,
            active_head: None,
            scan_counter: 0,
            total_cost: Cost::zero(),
            queue: PriorityQueue::new(),
        }
    }

    pub fn no_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn no_edges(&self) -> usize {
        self.edge_num
    }

    pub fn no_arcs(&self) -> usize {
        2 * self.edge_num
    }

    pub fn add_node_excess(&mut self, i: usize, delta: Flow) {
        assert!(i < self.nodes.len(), "node index {i} out of range");
        self.nodes[i].excess += delta;
        self.activate(i);
    }

    pub fn add_edge(&mut self, i: usize, j: usize, lower: Flow, upper: Flow, cost: Cost) -> usize {
        assert!(i < self.nodes.len() && j < self.nodes.len(), "node index out of range");
        assert!(i != j, "self-loops are not supported");
        assert!(self.edge_num < self.max_edges, "edge capacity exhausted");
        assert!(cmp::ge(upper, Flow::zero()), "upper bound must be non-negative");
        assert!(cmp::le(lower, Flow::zero()), "lower bound must be non-positive");
        assert!(cmp::lt(lower, upper), "lower bound must be strictly less than upper bound");

        let a = 2 * self.edge_num;
        let a_rev = a + 1;
        self.capacity[a] = upper;
        self.capacity[a_rev] = lower;
        self.edge_num += 1;

        self.arcs[a].sister = a_rev;
        self.arcs[a_rev].sister = a;
        self.arcs[a].head = j;
        self.arcs[a_rev].head = i;
        self.arcs[a].residual_capacity = upper;
        self.arcs[a_rev].residual_capacity = -lower;
        self.arcs[a].cost = cost;
        self.arcs[a_rev].cost = -cost;

        self.prepend(i, a, cmp::le(upper, Flow::zero()));
        self.prepend(j, a_rev, cmp::ge(lower, Flow::zero()));

        // pre-saturate either direction if needed to keep every residual arc's reduced
        // cost non-negative under the current potentials
        if cmp::gt(self.arcs[a].residual_capacity, Flow::zero()) && cmp::lt(self.reduced_cost_of(a), Cost::zero()) {
            let r = self.arcs[a].residual_capacity;
            self.push_flow_arc(a, r);
        }
        if cmp::gt(self.arcs[a_rev].residual_capacity, Flow::zero()) && cmp::lt(self.reduced_cost_of(a_rev), Cost::zero()) {
            let r = self.arcs[a_rev].residual_capacity;
            self.push_flow_arc(a_rev, r);
        }

        a
    }

    pub fn solve(&mut self) -> Cost {
        self.init();

        loop {
            let i = match self.active_head {
                Some(i) => i,
                None => break,
            };
            self.active_head = self.nodes[i].next_active;
            self.nodes[i].next_active = None;
            self.nodes[i].on_active_list = false;

            if cmp::gt(self.nodes[i].excess, Flow::zero()) {
                self.dijkstra(i);
                if cmp::gt(self.nodes[i].excess, Flow::zero()) {
                    self.activate(i);
                }
            }
        }

        debug_assert!(self.test_costs(), "accumulated cost diverged from the residual capacities");
        debug_assert!(self.test_optimality(), "solve() returned a non-optimal flow");

        self.total_cost
    }

    pub fn objective(&self) -> Cost {
        let mut total = Cost::zero();
        for e in 0..self.no_arcs() {
            total += self.flow(e) * self.arcs[e].cost;
        }
        total /= Cost::one() + Cost::one();
        total
    }

    pub fn flow(&self, e: usize) -> Flow {
        self.capacity[e] - self.arcs[e].residual_capacity
    }

    pub fn residual_capacity(&self, e: usize) -> Flow {
        self.arcs[e].residual_capacity
    }

    pub fn cost(&self, e: usize) -> Cost {
        self.arcs[e].cost
    }

    pub fn reduced_cost(&self, e: usize) -> Cost {
        self.reduced_cost_of(e)
    }

    pub fn potential(&self, i: usize) -> Cost {
        self.nodes[i].potential
    }

    pub fn upper_bound(&self, e: usize) -> Flow {
        self.capacity[e]
    }

    pub fn lower_bound(&self, e: usize) -> Flow {
        self.capacity[self.arcs[e].sister]
    }

    pub fn tail(&self, e: usize) -> usize {
        self.arcs[self.arcs[e].sister].head
    }

    pub fn head(&self, e: usize) -> usize {
        self.arcs[e].head
    }

    pub fn first_outgoing_arc(&self, i: usize) -> Option<usize> {
        let mut best: Option<usize> = None;
        for mut a in [self.nodes[i].first_saturated, self.nodes[i].first_nonsaturated] {
            while let Some(arc) = a {
                best = Some(match best {
                    Some(cur) => cur.min(arc),
                    None => arc,
                });
                a = self.arcs[arc].next;
            }
        }
        best
    }

    pub fn no_outgoing_arcs(&self, i: usize) -> usize {
        let mut n = 0;
        for mut a in [self.nodes[i].first_saturated, self.nodes[i].first_nonsaturated] {
            while let Some(arc) = a {
                n += 1;
                a = self.arcs[arc].next;
            }
        }
        n
    }

    pub fn push_flow(&mut self, e: usize, delta: Flow) {
        self.push_flow_arc(e, delta);
    }

    pub fn set_residual_capacity(&mut self, e: usize, new_residual_capacity: Flow) {
        assert!(cmp::ge(new_residual_capacity, Flow::zero()), "residual capacity must be non-negative");
        if cmp::eq(self.arcs[e].residual_capacity, Flow::zero()) {
            self.relink(e, true);
        }
        self.arcs[e].residual_capacity = new_residual_capacity;
        if cmp::eq(self.arcs[e].residual_capacity, Flow::zero()) {
            self.relink(e, false);
        }
    }

    pub fn update_cost(&mut self, e: usize, delta: Cost) {
        self.total_cost += delta * self.flow(e);
        self.arcs[e].cost += delta;
        let sister = self.arcs[e].sister;
        self.arcs[sister].cost = -self.arcs[e].cost;

        let mut a = e;
        if cmp::gt(self.reduced_cost_of(a), Cost::zero()) {
            a = sister;
        }
        if cmp::gt(self.arcs[a].residual_capacity, Flow::zero()) && cmp::lt(self.reduced_cost_of(a), Cost::zero()) {
            let r = self.arcs[a].residual_capacity;
            self.push_flow_arc(a, r);
        }
    }

    pub fn reset_costs(&mut self) {
        for e in 0..self.no_arcs() {
            let c = self.arcs[e].cost;
            self.update_cost(e, -c);
        }
        self.total_cost = Cost::zero();
    }

    pub fn order(&mut self) {
        self.order_inter_nodes();
        self.order_intra_nodes();
    }

    pub fn test_optimality(&self) -> bool {
        for i in 0..self.nodes.len() {
            if cmp::ne(self.nodes[i].excess, Flow::zero()) {
                return false;
            }
            let mut a = self.nodes[i].first_saturated;
            while let Some(arc) = a {
                if cmp::ne(self.arcs[arc].residual_capacity, Flow::zero()) {
                    return false;
                }
                a = self.arcs[arc].next;
            }
            let mut a = self.nodes[i].first_nonsaturated;
            while let Some(arc) = a {
                if cmp::le(self.arcs[arc].residual_capacity, Flow::zero()) || cmp::lt(self.reduced_cost_of(arc), Cost::zero()) {
                    return false;
                }
                a = self.arcs[arc].next;
            }
        }
        true
    }

    pub fn test_costs(&self) -> bool {
        for e in 0..self.no_arcs() {
            let sister = self.arcs[e].sister;
            let lhs = self.arcs[e].residual_capacity + self.arcs[sister].residual_capacity;
            let rhs = self.capacity[e] + self.capacity[sister];
            if cmp::ne(lhs, rhs) {
                return false;
            }
        }
        cmp::eq(self.objective(), self.total_cost)
    }

    // -------------------------------------------------------------------------------
    // internals
    // -------------------------------------------------------------------------------

    fn reduced_cost_of(&self, a: usize) -> Cost {
        let head = self.arcs[a].head;
        let tail = self.tail(a);
        self.arcs[a].cost + self.nodes[head].potential - self.nodes[tail].potential
    }

    fn activate(&mut self, i: usize) {
        if cmp::gt(self.nodes[i].excess, Flow::zero()) && !self.nodes[i].on_active_list {
            self.nodes[i].next_active = self.active_head;
            self.active_head = Some(i);
            self.nodes[i].on_active_list = true;
        }
    }

    fn prepend(&mut self, node: usize, arc: usize, saturated: bool) {
        let old_head = if saturated { self.nodes[node].first_saturated } else { self.nodes[node].first_nonsaturated };
        self.arcs[arc].next = old_head;
        self.arcs[arc].prev = None;
        if let Some(h) = old_head {
            self.arcs[h].prev = Some(arc);
        }
        if saturated {
            self.nodes[node].first_saturated = Some(arc);
        } else {
            self.nodes[node].first_nonsaturated = Some(arc);
        }
    }

    // shared by decrease_residual/increase_residual/set_residual_capacity, which differ
    // only in which direction they move an arc
    fn relink(&mut self, a: usize, from_saturated: bool) {
        let tail = self.tail(a);
        let prev = self.arcs[a].prev;
        let next = self.arcs[a].next;
        if let Some(n) = next {
            self.arcs[n].prev = prev;
        }
        if let Some(p) = prev {
            self.arcs[p].next = next;
        } else if from_saturated {
            self.nodes[tail].first_saturated = next;
        } else {
            self.nodes[tail].first_nonsaturated = next;
        }
        self.prepend(tail, a, !from_saturated);
    }

    fn decrease_residual(&mut self, a: usize, delta: Flow) {
        self.arcs[a].residual_capacity -= delta;
        if cmp::eq(self.arcs[a].residual_capacity, Flow::zero()) {
            self.relink(a, false);
        }
    }

    fn increase_residual(&mut self, a: usize, delta: Flow) {
        if cmp::eq(self.arcs[a].residual_capacity, Flow::zero()) {
            self.relink(a, true);
        }
        self.arcs[a].residual_capacity += delta;
    }

    fn push_flow_arc(&mut self, a: usize, delta: Flow) {
        let (a, delta) = if cmp::lt(delta, Flow::zero()) { (self.arcs[a].sister, -delta) } else { (a, delta) };
        let sister = self.arcs[a].sister;
        self.decrease_residual(a, delta);
        self.increase_residual(sister, delta);

        let head = self.arcs[a].head;
        let tail = self.arcs[sister].head;
        self.nodes[head].excess += delta;
        self.nodes[tail].excess -= delta;
        self.total_cost += delta * self.arcs[a].cost;

        self.activate(head);
    }

    fn init(&mut self) {
        for a in 0..self.no_arcs() {
            if cmp::gt(self.arcs[a].residual_capacity, Flow::zero()) && cmp::lt(self.reduced_cost_of(a), Cost::zero()) {
                let r = self.arcs[a].residual_capacity;
                self.push_flow_arc(a, r);
            }
        }

        for node in self.nodes.iter_mut() {
            node.next_active = None;
            node.on_active_list = false;
        }
        self.active_head = None;
        let mut tail_ptr: Option<usize> = None;
        for i in 0..self.nodes.len() {
            if cmp::gt(self.nodes[i].excess, Flow::zero()) {
                self.nodes[i].on_active_list = true;
                match tail_ptr {
                    None => self.active_head = Some(i),
                    Some(t) => self.nodes[t].next_active = Some(i),
                }
                tail_ptr = Some(i);
            }
        }
    }

    fn parent_chain_next(&self, arc: usize) -> Option<usize> {
        let tail = self.tail(arc);
        self.nodes[tail].parent
    }

    fn augment(&mut self, start: usize, end: usize) -> Flow {
        let mut delta = cmp::min(self.nodes[start].excess, -self.nodes[end].excess);

        let mut a = self.nodes[end].parent;
        while let Some(arc) = a {
            delta = cmp::min(delta, self.arcs[arc].residual_capacity);
            a = self.parent_chain_next(arc);
        }
        debug_assert!(cmp::gt(delta, Flow::zero()));

        self.nodes[end].excess += delta;
        let mut a = self.nodes[end].parent;
        while let Some(arc) = a {
            let next = self.parent_chain_next(arc);
            self.decrease_residual(arc, delta);
            let sister = self.arcs[arc].sister;
            self.increase_residual(sister, delta);
            a = next;
        }
        self.nodes[start].excess -= delta;

        delta
    }

    fn dijkstra(&mut self, start: usize) {
        debug_assert!(cmp::gt(self.nodes[start].excess, Flow::zero()));

        self.scan_counter += 2;
        let flag_perm = self.scan_counter - 1;
        let flag_temp = self.scan_counter;

        let mut heap_pos: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut permanent_head: Option<usize> = None;

        self.nodes[start].parent = None;
        self.nodes[start].flag = flag_temp;
        self.queue.reset();
        self.queue.add(start, Cost::zero(), &mut heap_pos);

        while let Some((i, d)) = self.queue.remove_min(&mut heap_pos) {
            if cmp::lt(self.nodes[i].excess, Flow::zero()) {
                let delta = self.augment(start, i);
                self.total_cost += delta * (d - self.nodes[i].potential + self.nodes[start].potential);

                let mut p = permanent_head;
                while let Some(node) = p {
                    self.nodes[node].potential += d;
                    p = self.nodes[node].scratch;
                }
                return;
            }

            self.nodes[i].potential -= d;
            self.nodes[i].flag = flag_perm;
            self.nodes[i].scratch = permanent_head;
            permanent_head = Some(i);

            let mut a = self.nodes[i].first_nonsaturated;
            while let Some(arc) = a {
                let j = self.arcs[arc].head;
                if self.nodes[j].flag != flag_perm {
                    let d = self.reduced_cost_of(arc);
                    if self.nodes[j].flag == flag_temp {
                        if cmp::lt(d, self.queue.key(j, &heap_pos)) {
                            self.queue.decrease_key(j, d, &mut heap_pos);
                            self.nodes[j].parent = Some(arc);
                        }
                    } else {
                        self.queue.add(j, d, &mut heap_pos);
                        self.nodes[j].flag = flag_temp;
                        self.nodes[j].parent = Some(arc);
                    }
                }
                a = self.arcs[arc].next;
            }
        }
    }

    fn exchange(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        let sa = self.arcs[a].sister;
        let sb = self.arcs[b].sister;
        let a_tail = self.tail(a);
        let b_tail = self.tail(b);
        let na = self.arcs[a].next;
        let nb = self.arcs[b].next;
        let pa = self.arcs[a].prev;
        let pb = self.arcs[b].prev;

        let (ha, hb) = (self.arcs[a].head, self.arcs[b].head);
        self.arcs[a].head = hb;
        self.arcs[b].head = ha;
        let (ra, rb) = (self.arcs[a].residual_capacity, self.arcs[b].residual_capacity);
        self.arcs[a].residual_capacity = rb;
        self.arcs[b].residual_capacity = ra;
        let (ca, cb) = (self.arcs[a].cost, self.arcs[b].cost);
        self.arcs[a].cost = cb;
        self.arcs[b].cost = ca;
        self.capacity.swap(a, b);

        if a != sb {
            debug_assert!(b != sa);
            self.arcs[a].sister = sb;
            self.arcs[b].sister = sa;
            self.arcs[sa].sister = b;
            self.arcs[sb].sister = a;
        }

        if self.arcs[a].next == Some(b) {
            let b_next = self.arcs[b].next;
            let a_prev = self.arcs[a].prev;
            self.arcs[b].next = Some(a);
            self.arcs[a].prev = Some(b);
            self.arcs[a].next = b_next;
            self.arcs[b].prev = a_prev;
            if let Some(x) = b_next {
                self.arcs[x].prev = Some(a);
            }
            if let Some(x) = a_prev {
                self.arcs[x].next = Some(b);
            }
        } else if self.arcs[b].next == Some(a) {
            let a_next = self.arcs[a].next;
            let b_prev = self.arcs[b].prev;
            self.arcs[b].prev = Some(a);
            self.arcs[a].next = Some(b);
            self.arcs[a].prev = b_prev;
            self.arcs[b].next = a_next;
            if let Some(x) = a_next {
                self.arcs[x].prev = Some(b);
            }
            if let Some(x) = b_prev {
                self.arcs[x].next = Some(a);
            }
        } else {
            self.arcs[a].next = nb;
            self.arcs[b].next = na;
            self.arcs[a].prev = pb;
            self.arcs[b].prev = pa;
            if let Some(x) = na {
                self.arcs[x].prev = Some(b);
            }
            if let Some(x) = nb {
                self.arcs[x].prev = Some(a);
            }
            if let Some(x) = pa {
                self.arcs[x].next = Some(b);
            }
            if let Some(x) = pb {
                self.arcs[x].next = Some(a);
            }
        }

        if a_tail != b_tail {
            if self.nodes[a_tail].first_saturated == Some(a) {
                self.nodes[a_tail].first_saturated = Some(b);
            }
            if self.nodes[a_tail].first_nonsaturated == Some(a) {
                self.nodes[a_tail].first_nonsaturated = Some(b);
            }
            if self.nodes[b_tail].first_saturated == Some(b) {
                self.nodes[b_tail].first_saturated = Some(a);
            }
            if self.nodes[b_tail].first_nonsaturated == Some(b) {
                self.nodes[b_tail].first_nonsaturated = Some(a);
            }
        } else {
            if self.nodes[a_tail].first_saturated == Some(a) {
                self.nodes[a_tail].first_saturated = Some(b);
            } else if self.nodes[b_tail].first_saturated == Some(b) {
                self.nodes[a_tail].first_saturated = Some(a);
            }
            if self.nodes[a_tail].first_nonsaturated == Some(a) {
                self.nodes[a_tail].first_nonsaturated = Some(b);
            } else if self.nodes[b_tail].first_nonsaturated == Some(b) {
                self.nodes[a_tail].first_nonsaturated = Some(a);
            }
        }
    }

    // group arcs by tail so every node's outgoing arcs occupy a contiguous range
    fn order_inter_nodes(&mut self) {
        let n = self.nodes.len();
        if n == 0 {
            return;
        }
        let num_arcs = self.no_arcs();

        let mut arc_first = vec![0usize; n + 1];
        let mut outgoing_arc_index = vec![0usize; n];
        for e in 0..num_arcs {
            let t = self.tail(e);
            arc_first[t + 1] += 1;
            outgoing_arc_index[t] += 1;
        }
        for i in 1..=n {
            arc_first[i] += arc_first[i - 1];
        }
        for i in 1..n {
            outgoing_arc_index[i] += outgoing_arc_index[i - 1];
        }

        for i in 0..n - 1 {
            let last = outgoing_arc_index[i];
            let mut arc_num = arc_first[i];
            while arc_num < last {
                let mut tail_node_id = self.tail(arc_num);
                while tail_node_id != i {
                    let arc_new_num = arc_first[tail_node_id];
                    self.exchange(arc_num, arc_new_num);
                    arc_first[tail_node_id] += 1;
                    tail_node_id = self.tail(arc_num);
                }
                arc_num += 1;
            }
        }
    }

    // sort each node's outgoing arcs by head, assuming order_inter_nodes already
    // grouped them by tail; the permutation is realized by cycle-following, marking
    // visited slots by subtracting the group size
    fn order_intra_nodes(&mut self) {
        let n = self.nodes.len();
        if n == 0 {
            return;
        }
        let num_arcs = self.no_arcs();

        let mut outgoing_arc_begin = vec![0usize; n + 1];
        for e in 0..num_arcs {
            let t = self.tail(e);
            outgoing_arc_begin[t + 1] += 1;
        }
        for i in 1..=n {
            outgoing_arc_begin[i] += outgoing_arc_begin[i - 1];
        }

        for i in 0..n {
            let begin = outgoing_arc_begin[i];
            let count = outgoing_arc_begin[i + 1] - begin;
            if count == 0 {
                continue;
            }

            let heads: Vec<usize> = (0..count).map(|k| self.head(begin + k)).collect();
            let mut perm: Vec<isize> = (0..count as isize).collect();
            perm.sort_by_key(|&k| heads[k as usize]);

            for c in 0..count {
                let next_idx = perm[c];
                if next_idx as usize == c || next_idx < 0 {
                    continue;
                }
                let mut cur_idx = c;
                let mut next_idx = next_idx;
                while perm[next_idx as usize] >= 0 {
                    self.exchange(begin + cur_idx, begin + next_idx as usize);
                    perm[cur_idx] -= count as isize;
                    cur_idx = next_idx as usize;
                    next_idx = perm[cur_idx];
                }
            }
        }
    }
}
