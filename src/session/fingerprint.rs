use crate::fragment::mask::MaskFragment;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5d1e_7a3c_90b4_e2f1;

/// Stable 128-bit fingerprint of a fragment list.
///
/// Covers geometry, color, and the coverage bytes inside each `width × height` window; stride
/// padding does not participate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FragmentFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Fingerprint `fragments` in order.
pub fn fingerprint_fragments(fragments: &[MaskFragment<'_>]) -> FragmentFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(fragments.len() as u32);
    for f in fragments {
        h.write_i32(f.width);
        h.write_i32(f.height);
        h.write_i32(f.dst_x);
        h.write_i32(f.dst_y);
        h.write_u32(f.color);
        let mut rows = 0u32;
        for (_, row) in f.rows() {
            h.write_bytes(row);
            rows += 1;
        }
        h.write_u32(rows);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn finish(self) -> FragmentFingerprint {
        let v = self.inner.digest128();
        FragmentFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/fingerprint.rs"]
mod tests;
