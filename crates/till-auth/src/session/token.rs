//! Session token generation.

use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;

use till_entity::session::SessionToken;

/// Generates a token of `length` characters drawn uniformly from
/// `[A-Za-z0-9]` using the operating system's CSPRNG.
pub fn generate_token(length: usize) -> SessionToken {
    let raw: String = OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();
    SessionToken::new(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_length_and_alphabet() {
        let token = generate_token(128);
        assert_eq!(token.len(), 128);
        assert!(token.expose().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_distinct() {
        let tokens: HashSet<String> = (0..100)
            .map(|_| generate_token(64).expose().to_string())
            .collect();
        assert_eq!(tokens.len(), 100);
    }
}
