//! Cyclic redundancy check over bit sequences
//!
//! The checksum is the remainder of modulo-2 polynomial long division, computed
//! bit by bit the way a hardware shift-register divider would.

use crate::{FrameError, Result};
use bitframe_core::BitSeq;

/// CRC-8 generator x^8 + x^2 + x + 1 (`100000111`)
pub const CRC8_GENERATOR: [bool; 9] = [true, false, false, false, false, false, true, true, true];

/// Checksum engine for a fixed generator polynomial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crc {
    generator: Vec<bool>,
}

impl Crc {
    /// Create a checksum engine from a generator polynomial, most significant term first
    pub fn new(generator: &[bool]) -> Result<Self> {
        if generator.len() < 2 {
            return Err(FrameError::InvalidGenerator {
                msg: format!("need at least 2 terms, got {}", generator.len()),
            });
        }

        if !generator[0] {
            return Err(FrameError::InvalidGenerator {
                msg: "leading term must be 1".to_string(),
            });
        }

        Ok(Self {
            generator: generator.to_vec(),
        })
    }

    /// CRC-8 with generator `100000111`
    pub fn crc8() -> Self {
        Self {
            generator: CRC8_GENERATOR.to_vec(),
        }
    }

    /// Checksum width in bits (generator degree)
    pub fn width(&self) -> usize {
        self.generator.len() - 1
    }

    /// Compute the checksum of `payload`.
    ///
    /// Only payload positions start a division step; the appended zero bits
    /// just absorb XOR contributions.
    pub fn compute(&self, payload: &[bool]) -> BitSeq {
        let width = self.width();
        let mut dividend = Vec::with_capacity(payload.len() + width);
        dividend.extend_from_slice(payload);
        dividend.resize(payload.len() + width, false);

        for i in 0..payload.len() {
            if !dividend[i] {
                continue;
            }
            for (j, &term) in self.generator.iter().enumerate() {
                if let Some(bit) = dividend.get_mut(i + j) {
                    *bit ^= term;
                }
            }
        }

        BitSeq::from(dividend.split_off(payload.len()))
    }

    /// Check a payload followed by its checksum.
    ///
    /// Input shorter than the checksum width cannot carry one and is rejected.
    pub fn verify(&self, payload_with_checksum: &[bool]) -> bool {
        if payload_with_checksum.len() < self.width() {
            return false;
        }
        self.compute(payload_with_checksum).iter().all(|&bit| !bit)
    }
}

impl Default for Crc {
    fn default() -> Self {
        Self::crc8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn bits(text: &str) -> BitSeq {
        BitSeq::parse(text).unwrap()
    }

    #[test]
    fn test_crc8_known_remainders() {
        let crc = Crc::crc8();
        assert_eq!(crc.compute(&bits("1101010111110")).to_string(), "11100110");
        assert_eq!(crc.compute(&bits("1")).to_string(), "00000111");
        assert_eq!(crc.compute(&bits("11111")).to_string(), "01011101");
        assert_eq!(crc.compute(&bits("11111111")).to_string(), "11110011");
    }

    #[test]
    fn test_empty_payload_checksum_is_zero() {
        let crc = Crc::crc8();
        assert_eq!(crc.compute(&[]).to_string(), "00000000");
        assert_eq!(crc.compute(&bits("0000")).to_string(), "00000000");
    }

    #[test]
    fn test_width_follows_generator() {
        assert_eq!(Crc::crc8().width(), 8);
        let crc = Crc::new(&bits("1011")).unwrap();
        assert_eq!(crc.width(), 3);
        assert_eq!(crc.compute(&bits("11010011101100")).to_string(), "100");
    }

    #[test]
    fn test_invalid_generators() {
        assert!(Crc::new(&[]).is_err());
        assert!(Crc::new(&[true]).is_err());
        assert!(Crc::new(&bits("0111")).is_err());
    }

    #[test]
    fn test_verify_rejects_short_input() {
        let crc = Crc::crc8();
        assert!(!crc.verify(&bits("0000000")));
        assert!(crc.verify(&bits("00000000")));
    }

    #[test]
    fn test_verify_detects_corruption() {
        let crc = Crc::crc8();
        let mut framed = bits("1101010111110");
        let checksum = crc.compute(&framed);
        framed.extend_from_slice(&checksum);
        assert!(crc.verify(&framed));

        framed.as_mut_slice()[3] ^= true;
        assert!(!crc.verify(&framed));
    }

    #[quickcheck]
    fn prop_checksum_self_consistent(payload: Vec<bool>) -> bool {
        let crc = Crc::crc8();
        let mut framed = BitSeq::from(payload);
        let checksum = crc.compute(&framed);
        framed.extend_from_slice(&checksum);
        checksum.len() == 8 && crc.verify(&framed)
    }

    #[quickcheck]
    fn prop_single_bit_error_detected(payload: Vec<bool>, index: usize) -> bool {
        let crc = Crc::crc8();
        let mut framed = BitSeq::from(payload);
        let checksum = crc.compute(&framed);
        framed.extend_from_slice(&checksum);

        let flip = index % framed.len();
        framed.as_mut_slice()[flip] ^= true;
        !crc.verify(&framed)
    }
}
