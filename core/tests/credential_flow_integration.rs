//! Integration tests for the login-to-session flow with keys loaded from disk

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use cb_core::domain::value_objects::TokenVerification;
    use cb_core::errors::{DomainError, TokenError};
    use cb_core::repositories::code_store::{CodeStoreBackend, InMemoryCodeStore};
    use cb_core::services::{LoginCodeStore, RedirectCodeStore, SessionBridge, TokenService};
    use cb_shared::config::{CodeConfig, TokenClassConfig, TokenConfig};

    fn key_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("keys/test")
            .join(name)
    }

    fn class_config(class: &str, ttl_seconds: i64) -> TokenClassConfig {
        TokenClassConfig::new(
            key_path(&format!("{}_private.pem", class)),
            key_path(&format!("{}_public.pem", class)),
            ttl_seconds,
        )
    }

    fn token_config() -> TokenConfig {
        TokenConfig {
            access: class_config("access", 900),
            refresh: class_config("refresh", 604_800),
            email_verification: class_config("email_verification", 86_400),
            clock_skew_seconds: 30,
        }
    }

    #[tokio::test]
    async fn test_login_code_then_redirect_exchange() {
        let tokens = Arc::new(TokenService::from_config(&token_config()).unwrap());
        let backend: Arc<dyn CodeStoreBackend> = Arc::new(InMemoryCodeStore::new());
        let codes = CodeConfig::default();

        let login_codes = LoginCodeStore::new(backend.clone(), codes.login).unwrap();
        let redirect_codes = Arc::new(RedirectCodeStore::new(backend, codes.redirect).unwrap());
        let bridge = SessionBridge::new(tokens.clone(), redirect_codes);

        // identity confirmed out of band, then bridged across a redirect
        let login_code = login_codes.issue_code(&"u-42".to_string()).await.unwrap();
        assert!(login_codes.validate_code(&"u-42".to_string(), &login_code).await.unwrap());

        let redirect_code = bridge.issue_redirect_code("u-42").await.unwrap();
        assert_ne!(redirect_code, login_code);

        let pair = bridge
            .exchange_redirect_code(&redirect_code)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tokens.verify_access_token(&pair.access_token).unwrap(), "u-42");
        assert!(bridge.exchange_redirect_code(&redirect_code).await.unwrap().is_none());

        let refreshed = bridge.refresh_session(&pair.refresh_token).unwrap();
        assert_eq!(tokens.verify_access_token(&refreshed.token).unwrap(), "u-42");
    }

    #[test]
    fn test_email_verification_with_file_keys() {
        let tokens = TokenService::from_config(&token_config()).unwrap();
        let user_id = "11111111-1111-1111-1111-111111111111";

        let signed = tokens
            .generate_email_verification_token(user_id, "a@b.com", "654321")
            .unwrap();
        let verification: TokenVerification<_> =
            tokens.verify_email_verification_token(&signed.token).into();

        assert!(verification.valid);
        let claims = verification.claims.unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.code, "654321");
    }

    #[test]
    fn test_verification_only_class_from_config() {
        let mut config = token_config();
        config.refresh.private_key_path = None;
        let tokens = TokenService::from_config(&config).unwrap();

        assert_eq!(
            tokens.generate_refresh_token("u-42"),
            Err(TokenError::KeyUnavailable)
        );
        assert!(tokens.generate_access_token("u-42").is_ok());
    }

    #[test]
    fn test_missing_key_file_refuses_to_start() {
        let mut config = token_config();
        config.access.public_key_path = key_path("does_not_exist.pem");

        assert!(matches!(
            TokenService::from_config(&config),
            Err(DomainError::Configuration { .. })
        ));
    }
}
