use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RefreshTokenError;

/// Entropy drawn per token: 32 bytes, 256 bits.
const TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh-token value.
///
/// Draws from the operating system's CSPRNG and hex-encodes the result to a
/// 64-character lowercase string. The value carries no structure; its
/// validity state lives entirely in the persistence layer. Collisions are
/// treated as negligible and not checked here.
///
/// # Returns
/// 64-character lowercase hexadecimal token value
///
/// # Errors
/// * `EntropySourceFailure` - The random source failed
pub fn generate() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::EntropySourceFailure(e.to_string()))?;

    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generate_format() {
        let token = generate().expect("Failed to generate token");

        assert_eq!(token.len(), 64);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_is_unpredictable() {
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            let token = generate().expect("Failed to generate token");
            assert_eq!(token.len(), 64);
            assert!(seen.insert(token), "generated a duplicate token");
        }
    }
}
