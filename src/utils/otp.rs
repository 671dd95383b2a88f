use rand::Rng;

/// Inclusive bounds for recovery codes: six digits, never a leading zero.
pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

/// Seconds a freshly issued code stays valid.
pub const OTP_TTL_SECONDS: i64 = 300;

/// Generates the one-time password sent by the password recovery flow.
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    rng.gen_range(OTP_MIN..=OTP_MAX).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_is_six_digits() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_otp_within_range() {
        for _ in 0..100 {
            let code = generate_otp();
            let value: u32 = code.parse().unwrap();
            assert!((OTP_MIN..=OTP_MAX).contains(&value));
        }
    }

    #[test]
    fn test_otp_never_starts_with_zero() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_ne!(code.as_bytes()[0], b'0');
        }
    }
}
