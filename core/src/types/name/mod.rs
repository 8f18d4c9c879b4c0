use nutype::nutype;
use std::borrow::Borrow;

/// Unique key of a catalog entry, as shown in the result list.
///
/// Stored verbatim: presenters hand the exact row text back for lookup.
#[nutype(
    validate(not_empty),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct CandidateName(String);

impl Borrow<str> for CandidateName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}
