use alloc::vec::Vec;
use core::{cmp, fmt, marker::PhantomData};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::SmallCowVec;

// Size hints come from the input, don't trust them for large preallocations.
const MAX_PREALLOCATED_SIZE: usize = 1 << 12;

impl<T: Serialize, const N: usize> Serialize for SmallCowVec<T, N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct SmallCowVecVisitor<T, const N: usize>(PhantomData<T>);

impl<'de, T: Deserialize<'de>, const N: usize> de::Visitor<'de> for SmallCowVecVisitor<T, N> {
    type Value = SmallCowVec<T, N>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let size_hint = cmp::min(seq.size_hint().unwrap_or(0), MAX_PREALLOCATED_SIZE);
        let mut items = Vec::with_capacity(size_hint);
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(items.into())
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for SmallCowVec<T, N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SmallCowVecVisitor(PhantomData))
    }
}
