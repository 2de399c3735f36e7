use std::fmt::Debug;

use num_traits::Float;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::KdIndexError;
use crate::persist::KD_INDEX_MAGIC;

/// A trait for scalar types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only
/// floating-point scalars are supported: the nearest-neighbor tolerance and
/// the reported distances require `epsilon` and `sqrt`, which have no
/// meaning for integer coordinates.
pub trait Coordinate:
    private::Sealed + Float + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// The type tag stored in the header of a persisted tree
    const TYPE_INDEX: u8;
}

impl Coordinate for f32 {
    const TYPE_INDEX: u8 = 0;
}

impl Coordinate for f64 {
    const TYPE_INDEX: u8 = 1;
}

/// An enum over the allowed coordinate types in a persisted tree.
pub enum CoordType {
    Float32,
    Float64,
}

impl CoordType {
    /// Infer the CoordType from an existing persisted-tree buffer.
    ///
    /// This can be used to discern the generic type to use when decoding a
    /// tree whose coordinate type is not known up front.
    pub fn from_buffer<T: AsRef<[u8]>>(data: &T) -> Result<Self, KdIndexError> {
        let data = data.as_ref();
        if data.len() < 2 || data[0] != KD_INDEX_MAGIC {
            return Err(KdIndexError::InvalidFormat(
                "data not in kd-index format".to_string(),
            ));
        }

        let version_and_type = data[1];
        let type_ = version_and_type & 0x0f;
        let result = match type_ {
            f32::TYPE_INDEX => CoordType::Float32,
            f64::TYPE_INDEX => CoordType::Float64,
            t => {
                return Err(KdIndexError::InvalidFormat(format!(
                    "unexpected coordinate type {}",
                    t
                )))
            }
        };
        Ok(result)
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
