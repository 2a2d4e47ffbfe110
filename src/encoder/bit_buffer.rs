/// Append-only bit sequence, most significant bit first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `bit_len` bits of `value`, high bit first
    pub fn put(&mut self, value: u32, bit_len: usize) {
        debug_assert!(bit_len <= 32);
        debug_assert!(bit_len == 32 || value >> bit_len == 0);
        self.bits
            .extend((0..bit_len).rev().map(|i| (value >> i) & 1 == 1));
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes; a trailing partial byte is zero filled
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_msb_first() {
        let mut buffer = BitBuffer::new();
        buffer.put(0b0010, 4);
        buffer.put(0b000001011, 9);
        assert_eq!(buffer.len(), 13);
        assert_eq!(
            buffer.bits(),
            &[
                false, false, true, false, false, false, false, false, false, true, false, true,
                true
            ]
        );
    }

    #[test]
    fn test_to_bytes() {
        let mut buffer = BitBuffer::new();
        buffer.put(0xEC, 8);
        buffer.put(0b101, 3);
        assert_eq!(buffer.to_bytes(), vec![0xEC, 0b1010_0000]);
    }

    #[test]
    fn test_zero_length_put() {
        let mut buffer = BitBuffer::new();
        buffer.put(0, 0);
        assert!(buffer.is_empty());
    }
}
