pub mod construction;
pub mod crossover;
pub mod reversal;
pub mod selection;

pub use self::construction::RouteGenerator;
pub use self::crossover::edge_recombination;
pub use self::reversal::{MAX_MOVE_ATTEMPTS, find_reversal, reverse_segment};
pub use self::selection::tournament;
