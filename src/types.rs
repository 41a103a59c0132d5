pub type Distance = f64;

/// Distance of a missing edge, and of any route that uses one.
pub const INFEASIBLE: Distance = Distance::INFINITY;

/// Index of a city inside a [`Graph`](crate::problem::Graph).
///
/// Ids are dense and follow the order in which cities are declared on the
/// first input line, so they double as row/column indices into distance and
/// pheromone matrices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct CityId(u16);

impl CityId {
    /// Returns `None` if `index` does not fit in a city id.
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(CityId)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for CityId {
    fn from(value: u16) -> Self {
        CityId(value)
    }
}
