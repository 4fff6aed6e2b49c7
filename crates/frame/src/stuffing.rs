//! Zero-bit insertion so frame bodies never contain the flag pattern

use bitframe_core::BitSeq;

/// Longest run of one bits allowed before a zero is inserted
pub const MAX_ONES_RUN: usize = 5;

/// Insert a zero after every run of five consecutive ones
pub fn stuff(bits: &[bool]) -> BitSeq {
    let mut out = BitSeq::with_capacity(bits.len() + bits.len() / MAX_ONES_RUN);
    let mut ones = 0usize;

    for &bit in bits {
        out.push(bit);
        if bit {
            ones += 1;
            if ones == MAX_ONES_RUN {
                out.push(false);
                ones = 0;
            }
        } else {
            ones = 0;
        }
    }

    out
}

/// Remove the zeros inserted by [`stuff`].
///
/// After five ones the following bit is dropped only if it is present and
/// zero; a one or the end of input is left alone.
pub fn unstuff(bits: &[bool]) -> BitSeq {
    let mut out = BitSeq::with_capacity(bits.len());
    walk(bits, |bit| out.push(bit), |_| {});
    out
}

/// Positions in a stuffed sequence of the bits [`unstuff`] would remove
pub fn stuffed_positions(bits: &[bool]) -> Vec<usize> {
    let mut positions = Vec::new();
    walk(bits, |_| {}, |index| positions.push(index));
    positions
}

fn walk(bits: &[bool], mut keep: impl FnMut(bool), mut skip: impl FnMut(usize)) {
    let mut ones = 0usize;
    let mut i = 0usize;

    while i < bits.len() {
        let bit = bits[i];
        keep(bit);

        if bit {
            ones += 1;
            if ones == MAX_ONES_RUN {
                if bits.get(i + 1) == Some(&false) {
                    i += 1;
                    skip(i);
                }
                ones = 0;
            }
        } else {
            ones = 0;
        }

        i += 1;
    }
}
