// Bottleneck ranking over activity-pair transition times
//
// Transition times are measured elsewhere (the performance DFG, or an
// external discovery tool) and arrive as a TransitionKey -> mean seconds
// mapping. This module only normalizes, filters and ranks them.
//
// Key Insight: a transition's mean waiting time, not its frequency, is what
// makes it a bottleneck. A rare but slow hand-off outranks a busy fast one.

mod ranker;
mod transition;

pub use ranker::{
    rank_bottlenecks, BottleneckOutcome, BottleneckRanking, BottleneckRecord, BottleneckRow,
    DEFAULT_TOP_K,
};
pub use transition::{
    normalize_transitions, parse_transition_times, RawTransitionStat, TransitionKey,
    TransitionTimes,
};
