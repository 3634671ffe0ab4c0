//! Output file kinds and header descriptors

/// Closed set of logical output files produced by one serializer variant.
///
/// `ordinal()` is the index of the kind in `ALL` and is used directly as the
/// writer slot, so implementations must keep the two in step.
pub trait FileKind: Copy + 'static {
    const ALL: &'static [Self];

    /// Base name of the output file, e.g. `person_knows_person`
    fn name(self) -> &'static str;

    fn ordinal(self) -> usize;
}

/// A header-bearing output file declared by a serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    pub name: String,
    pub columns: Vec<String>,
}
