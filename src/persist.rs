//! Lossless persistence of built trees.
//!
//! A persisted tree is a two-byte header followed by a bincode payload. The
//! header carries a magic byte and a version-and-type byte (format version
//! in the high nibble, coordinate [`TYPE_INDEX`][crate::Coordinate] in the
//! low nibble); decoding validates all three before touching the payload.
//! The payload holds the whole tree: points, permutation, leaf-size bound,
//! depth, and the node arena with one variant tag per node.

use std::io::{Read, Write};

use crate::error::{KdIndexError, Result};
use crate::r#type::Coordinate;
use crate::tree::KdTree;

/// Magic byte identifying a persisted kd-index tree.
pub const KD_INDEX_MAGIC: u8 = 0x6b;

/// Version of the persisted format.
pub const KD_INDEX_VERSION: u8 = 1;

const HEADER_SIZE: usize = 2;

/// Write `tree` to `writer` in the persisted format.
pub fn encode<N: Coordinate, W: Write>(tree: &KdTree<N>, mut writer: W) -> Result<()> {
    let header = [KD_INDEX_MAGIC, (KD_INDEX_VERSION << 4) + N::TYPE_INDEX];
    writer.write_all(&header)?;
    bincode::serialize_into(writer, tree)?;
    Ok(())
}

/// Read a tree back from `reader`.
///
/// Fails with [`KdIndexError::InvalidFormat`] if the header does not
/// describe a kd-index tree of this version and coordinate type.
pub fn decode<N: Coordinate, R: Read>(mut reader: R) -> Result<KdTree<N>> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    if header[0] != KD_INDEX_MAGIC {
        return Err(KdIndexError::InvalidFormat(
            "data not in kd-index format".to_string(),
        ));
    }

    let version_and_type = header[1];
    let version = version_and_type >> 4;
    if version != KD_INDEX_VERSION {
        return Err(KdIndexError::InvalidFormat(format!(
            "got v{} data when expected v{}",
            version, KD_INDEX_VERSION
        )));
    }

    let type_ = version_and_type & 0x0f;
    if type_ != N::TYPE_INDEX {
        return Err(KdIndexError::InvalidFormat(format!(
            "got coordinate type {} data when expected type {}",
            type_,
            N::TYPE_INDEX
        )));
    }

    let tree = bincode::deserialize_from(reader)?;
    Ok(tree)
}

/// Encode `tree` into an in-memory buffer.
pub fn to_vec<N: Coordinate>(tree: &KdTree<N>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(tree, &mut out)?;
    Ok(out)
}

/// Decode a tree from an in-memory buffer.
pub fn from_slice<N: Coordinate>(data: &[u8]) -> Result<KdTree<N>> {
    decode(data)
}
