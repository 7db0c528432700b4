use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// User supplied identity of a domain object, tagged with the object kind so a
/// `JobId` can never be passed where a `PartitionId` is expected.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Id<T> {
    pub id: u64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: u64) -> Self {
        Id { id, _marker: PhantomData }
    }

    pub fn value(&self) -> u64 {
        self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for u64 {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> From<u64> for Id<T> {
    fn from(id: u64) -> Self {
        Id::new(id)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.id)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct JobTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct PartitionTag;

pub type JobId = Id<JobTag>;
pub type PartitionId = Id<PartitionTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_names_the_id_kind() {
        assert_eq!(format!("{:?}", JobId::new(7)), "JobId: 7");
        assert_eq!(format!("{:?}", PartitionId::new(3)), "PartitionId: 3");
    }

    #[test]
    fn display_and_conversion_use_raw_value() {
        let id = PartitionId::from(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(u64::from(id), 42);
    }
}
