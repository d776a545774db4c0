/// A rental listing and the neighbourhood it sits in.
///
/// Many-to-one with [`crate::records::calendar::CalendarRecord`]: each
/// listing has many calendar rows, and belongs to exactly one neighbourhood.
/// The neighbourhood name string is the join key toward the boundary
/// features, not any geometric relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: i64,
    pub neighbourhood: String,
}

impl Listing {
    /// Creates a new Listing.
    pub fn new(id: i64, neighbourhood: impl Into<String>) -> Self {
        Self {
            id,
            neighbourhood: neighbourhood.into(),
        }
    }
}
