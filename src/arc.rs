// `sister(e) = e ^ 1` always holds, but we still carry an explicit field because arc
// reordering transiently separates pairs while permuting the arc array.
#[derive(Debug, Clone)]
pub(crate) struct Arc<Flow, Cost> {
    pub head: usize,
    pub sister: usize,

    pub prev: Option<usize>,
    pub next: Option<usize>,

    pub residual_capacity: Flow,
    pub cost: Cost,
}

impl<Flow, Cost> Arc<Flow, Cost>
where
    Flow: num_traits::Zero,
    Cost: num_traits::Zero,
{
    pub fn empty() -> Self {
        Self {
            head: 0,
            sister: 0,
            prev: None,
            next: None,
            residual_capacity: Flow::zero(),
            cost: Cost::zero(),
        }
    }
}
