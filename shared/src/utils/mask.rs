//! Masking helpers for logging secrets
//!
//! Codes, tokens and identities must never reach the logs verbatim. Only a
//! short prefix is kept so that log lines can still be correlated.

/// Number of leading characters kept visible
const VISIBLE_PREFIX: usize = 4;

/// Mask a secret for logging, keeping at most the first four characters
///
/// Values of eight characters or fewer are fully masked.
pub fn mask_secret(value: &str) -> String {
    let len = value.chars().count();
    if len <= VISIBLE_PREFIX * 2 {
        return "****".to_string();
    }
    let prefix: String = value.chars().take(VISIBLE_PREFIX).collect();
    format!("{}****", prefix)
}

/// Mask a store key of the form `prefix + secret`
///
/// Everything up to and including the last `:` is kept so the key family
/// stays visible; the remainder is masked with [`mask_secret`].
pub fn mask_key(key: &str) -> String {
    match key.rfind(':') {
        Some(split) => format!("{}{}", &key[..=split], mask_secret(&key[split + 1..])),
        None => mask_secret(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_short_values_fully() {
        assert_eq!(mask_secret(""), "****");
        assert_eq!(mask_secret("u-42"), "****");
        assert_eq!(mask_secret("12345678"), "****");
    }

    #[test]
    fn test_mask_keeps_prefix() {
        assert_eq!(mask_secret("Zm9vYmFyYmF6cXV4"), "Zm9v****");
        assert_eq!(mask_secret("密码密码密码密码密码"), "密码密码****");
    }

    #[test]
    fn test_mask_key_keeps_prefix_only() {
        let code = "Zm9vYmFyYmF6cXV4cXV1eA";
        let masked = mask_key(&format!("otc:login:{}", code));
        assert_eq!(masked, "otc:login:Zm9v****");
        assert!(!masked.contains(code));

        assert_eq!(mask_key("otc:login:"), "otc:login:****");
        assert_eq!(mask_key(code), "Zm9v****");
    }
}
