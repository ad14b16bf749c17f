//! Bucket hashing: Paul Hsieh's SuperFastHash reduced modulo the table size.

#[inline]
fn get16(b: &[u8]) -> u32 {
    u16::from_le_bytes([b[0], b[1]]) as u32
}

/// SuperFastHash over `data`.
///
/// Blocks are read as little-endian 16-bit halves so results do not depend on
/// the host. Trailing single bytes are sign-extended the way the reference
/// implementation treats `signed char`. An empty key hashes to 0.
pub fn super_fast_hash(data: &[u8]) -> u32 {
    if data.is_empty() {
        return 0;
    }
    let mut hash = data.len() as u32;

    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        hash = hash.wrapping_add(get16(&block[..2]));
        let tmp = (get16(&block[2..]) << 11) ^ hash;
        hash = (hash << 16) ^ tmp;
        hash = hash.wrapping_add(hash >> 11);
    }

    let rem = blocks.remainder();
    match rem.len() {
        3 => {
            hash = hash.wrapping_add(get16(rem));
            hash ^= hash << 16;
            hash ^= ((rem[2] as i8 as i32) << 18) as u32;
            hash = hash.wrapping_add(hash >> 11);
        }
        2 => {
            hash = hash.wrapping_add(get16(rem));
            hash ^= hash << 11;
            hash = hash.wrapping_add(hash >> 17);
        }
        1 => {
            hash = hash.wrapping_add(rem[0] as i8 as i32 as u32);
            hash ^= hash << 10;
            hash = hash.wrapping_add(hash >> 1);
        }
        _ => {}
    }

    // Force avalanching of the final bits.
    hash ^= hash << 3;
    hash = hash.wrapping_add(hash >> 5);
    hash ^= hash << 4;
    hash = hash.wrapping_add(hash >> 17);
    hash ^= hash << 25;
    hash = hash.wrapping_add(hash >> 6);
    hash
}

/// Maps `key` to a bucket in `[0, buckets)`. Empty keys map to bucket 0.
///
/// `buckets` must be non-zero.
#[inline]
pub fn bucket_index(key: &[u8], buckets: usize) -> usize {
    debug_assert!(buckets > 0, "bucket_index needs at least one bucket");
    super_fast_hash(key) as usize % buckets
}
