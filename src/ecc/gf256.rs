//! GF(256) arithmetic with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D)

const PRIMITIVE: u16 = 0x11D;

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut value: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = value as u8;
        value <<= 1;
        if value & 0x100 != 0 {
            value ^= PRIMITIVE;
        }
        i += 1;
    }
    table[255] = table[0];
    table
}

const fn build_log_table(exp: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static EXP_TABLE: [u8; 256] = build_exp_table();
static LOG_TABLE: [u8; 256] = build_log_table(&EXP_TABLE);

/// Discrete log of `n`; `None` for zero
pub fn glog(n: u8) -> Option<u8> {
    if n == 0 {
        None
    } else {
        Some(LOG_TABLE[n as usize])
    }
}

/// α^n, with the exponent reduced modulo 255
pub fn gexp(n: usize) -> u8 {
    EXP_TABLE[n % 255]
}

/// GF(256) field operations
pub struct Gf256;

impl Gf256 {
    pub fn mul(a: u8, b: u8) -> u8 {
        match (glog(a), glog(b)) {
            (Some(la), Some(lb)) => gexp(la as usize + lb as usize),
            _ => 0,
        }
    }

    /// Panics when `b` is zero.
    pub fn div(a: u8, b: u8) -> u8 {
        let Some(lb) = glog(b) else {
            panic!("division by zero in GF(256)");
        };
        match glog(a) {
            Some(la) => gexp(la as usize + 255 - lb as usize),
            None => 0,
        }
    }

    /// `a^n` with `0^0 = 1`
    pub fn pow(a: u8, n: usize) -> u8 {
        match glog(a) {
            Some(la) => gexp(la as usize * (n % 255)),
            None if n == 0 => 1,
            None => 0,
        }
    }

    /// Multiplicative inverse of a non-zero element
    pub fn inv(a: u8) -> u8 {
        Self::div(1, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_known_values() {
        assert_eq!(gexp(0), 1);
        assert_eq!(gexp(8), 29);
        assert_eq!(gexp(25), 3);
        assert_eq!(gexp(254), 142);
        assert_eq!(glog(1), Some(0));
        assert_eq!(glog(2), Some(1));
        assert_eq!(glog(3), Some(25));
        assert_eq!(glog(0), None);
    }

    #[test]
    fn test_gexp_wraps_modulo_255() {
        assert_eq!(gexp(255), 1);
        assert_eq!(gexp(256), 2);
        assert_eq!(gexp(260), gexp(5));
    }

    #[test]
    fn test_log_exp_inverse() {
        for n in 1..=255u8 {
            let l = glog(n).unwrap();
            assert_eq!(gexp(l as usize), n);
        }
    }

    #[test]
    fn test_mul_div() {
        assert_eq!(Gf256::mul(0, 5), 0);
        assert_eq!(Gf256::mul(5, 0), 0);
        assert_eq!(Gf256::div(0, 5), 0);
        assert_eq!(Gf256::div(7, 7), 1);
        for a in 1..=255u8 {
            assert_eq!(Gf256::mul(a, Gf256::inv(a)), 1);
        }
        assert_eq!(Gf256::mul(Gf256::div(123, 45), 45), 123);
    }

    #[test]
    fn test_pow() {
        assert_eq!(Gf256::pow(2, 255), 1);
        assert_eq!(Gf256::pow(2, 256), 2);
        assert_eq!(Gf256::pow(0, 10), 0);
        assert_eq!(Gf256::pow(0, 0), 1);
        assert_eq!(Gf256::pow(3, 0), 1);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_div_by_zero_panics() {
        Gf256::div(3, 0);
    }
}
