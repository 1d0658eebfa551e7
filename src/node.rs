#[derive(Debug, Clone)]
pub(crate) struct Node<Flow, Cost> {
    pub excess: Flow,
    pub potential: Cost,

    pub first_nonsaturated: Option<usize>,
    pub first_saturated: Option<usize>,

    pub parent: Option<usize>,

    pub next_active: Option<usize>,
    pub on_active_list: bool,

    // compared against the two per-scan counters minted in Solver::dijkstra
    pub flag: u64,

    // heap position while flag is temporary, next_permanent backpointer once permanent
    pub scratch: Option<usize>,
}

impl<Flow, Cost> Node<Flow, Cost>
where
    Flow: num_traits::Zero,
    Cost: num_traits::Zero,
{
    pub fn new() -> Self {
        Self {
            excess: Flow::zero(),
            potential: Cost::zero(),
            first_nonsaturated: None,
            first_saturated: None,
            parent: None,
            next_active: None,
            on_active_list: false,
            flag: 0,
            scratch: None,
        }
    }
}
