//! Admin gate.
//!
//! The original site delegates admin access to a hosted login; here the gate
//! is a PIN whose SHA-256 digest lives in config. Admin commands are refused
//! until a PIN is configured and presented (flag or `INKBOOK_ADMIN_PIN`).

use sha2::{Digest, Sha256};

use crate::config::{AdminConfig, SecretString};
use crate::error::Error;

/// Hex-encoded SHA-256 digest of a PIN.
pub fn pin_digest(pin: &SecretString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.expose_secret().as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Check a presented PIN against the configured digest.
///
/// No digest configured means the admin area is locked, not open — the
/// caller gets a hint to run `inkbook init --pin`.
pub fn verify_pin(admin: &AdminConfig, presented: Option<&SecretString>) -> Result<(), Error> {
    let Some(expected) = admin.pin_sha256.as_deref() else {
        return Err(Error::Unauthorized(
            "no admin PIN configured — run `inkbook init --pin <PIN>` first".to_string(),
        ));
    };

    let Some(pin) = presented else {
        return Err(Error::Unauthorized(
            "admin PIN required — pass --pin or set INKBOOK_ADMIN_PIN".to_string(),
        ));
    };

    if pin_digest(pin) == expected {
        Ok(())
    } else {
        tracing::warn!("admin PIN rejected");
        Err(Error::Unauthorized("admin PIN rejected".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(pin: &str) -> AdminConfig {
        AdminConfig {
            pin_sha256: Some(pin_digest(&SecretString::from(pin))),
        }
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = pin_digest(&SecretString::from("1234"));
        assert_eq!(digest.len(), 64);
        // sha256("1234")
        assert_eq!(
            digest,
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn test_correct_pin_passes() {
        let admin = configured("1234");
        assert!(verify_pin(&admin, Some(&SecretString::from("1234"))).is_ok());
    }

    #[test]
    fn test_wrong_pin_rejected() {
        let admin = configured("1234");
        let err = verify_pin(&admin, Some(&SecretString::from("4321"))).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_unconfigured_gate_is_locked() {
        let admin = AdminConfig::default();
        let err = verify_pin(&admin, Some(&SecretString::from("1234"))).unwrap_err();
        assert!(err.to_string().contains("inkbook init"));
    }

    #[test]
    fn test_missing_pin_rejected() {
        let admin = configured("1234");
        assert!(verify_pin(&admin, None).is_err());
    }
}
