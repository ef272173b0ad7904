//! Secret comparison and the admin-key gate
//!
//! Every comparison involving secret material (admin key, score signatures)
//! goes through [`constant_time_eq`].

/// Admin key configuration
#[derive(Clone)]
pub struct AdminAuth {
    /// Admin key (None = admin access disabled)
    key: Option<String>,
}

impl AdminAuth {
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()),
        }
    }

    /// Load the admin key from the ADMIN_KEY environment variable
    pub fn from_env() -> Self {
        let auth = Self::new(std::env::var("ADMIN_KEY").ok());
        if auth.is_enabled() {
            tracing::info!("Admin key configured");
        } else {
            tracing::warn!("ADMIN_KEY is not set - all admin requests will be rejected");
        }
        auth
    }

    /// Check if an admin key is configured
    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Validate a provided admin key. Fails closed when no key is configured.
    pub fn validate(&self, provided: &str) -> bool {
        match &self.key {
            Some(key) => constant_time_eq(key.as_bytes(), provided.as_bytes()),
            None => false,
        }
    }
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuth")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Constant-time byte comparison to prevent timing attacks.
///
/// Lengths are compared first; for equal lengths every byte is visited
/// regardless of where the first difference is.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(!constant_time_eq(b"hello", b"hellp"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_admin_auth_disabled_rejects_everything() {
        let auth = AdminAuth::new(None);
        assert!(!auth.is_enabled());
        assert!(!auth.validate(""));
        assert!(!auth.validate("anything"));

        let blank = AdminAuth::new(Some("   ".to_string()));
        assert!(!blank.is_enabled());
        assert!(!blank.validate(""));
    }

    #[test]
    fn test_admin_auth_enabled() {
        let auth = AdminAuth::new(Some(" s3cret ".to_string()));
        assert!(auth.is_enabled());
        assert!(auth.validate("s3cret"));
        assert!(!auth.validate("s3cre"));
        assert!(!auth.validate("S3CRET"));
        assert!(!auth.validate(""));
    }

    #[test]
    fn test_debug_hides_key() {
        let auth = AdminAuth::new(Some("hunter2".to_string()));
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("enabled: true"));
    }

    #[test]
    #[serial]
    fn test_admin_auth_from_env() {
        std::env::set_var("ADMIN_KEY", "from-env");
        let auth = AdminAuth::from_env();
        assert!(auth.validate("from-env"));

        std::env::remove_var("ADMIN_KEY");
        assert!(!AdminAuth::from_env().is_enabled());
    }
}
