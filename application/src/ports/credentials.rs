//! Credential source port
//!
//! Credentials are opaque secrets keyed by name (environment variable names
//! in practice). They are only ever handed to library constructors and are
//! never logged or echoed back in an outcome.

use secrecy::{ExposeSecret, SecretString};

/// Port for looking up named secrets
pub trait CredentialSource: Send + Sync {
    /// Look up a secret; unset and empty values both yield `None`
    fn lookup(&self, name: &str) -> Option<SecretString>;

    /// First available secret among `names`, with the name that provided it
    fn first_available(&self, names: &[String]) -> Option<(String, SecretString)> {
        names.iter().find_map(|name| {
            self.lookup(name)
                .filter(|secret| !secret.expose_secret().is_empty())
                .map(|secret| (name.clone(), secret))
        })
    }
}

/// Source with no credentials at all, for tests and dry exploration
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn lookup(&self, _name: &str) -> Option<SecretString> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl CredentialSource for Fixed {
        fn lookup(&self, name: &str) -> Option<SecretString> {
            match name {
                "EMPTY" => Some(SecretString::from(String::new())),
                "TOKEN_B" => Some(SecretString::from("b-secret".to_string())),
                _ => None,
            }
        }
    }

    #[test]
    fn test_first_available_skips_missing_and_empty() {
        let names = vec!["TOKEN_A".to_string(), "EMPTY".to_string(), "TOKEN_B".to_string()];
        let (name, secret) = Fixed.first_available(&names).unwrap();
        assert_eq!(name, "TOKEN_B");
        assert_eq!(secret.expose_secret(), "b-secret");
    }

    #[test]
    fn test_no_credentials() {
        assert!(NoCredentials.lookup("GITHUB_TOKEN").is_none());
        assert!(NoCredentials.first_available(&["X".to_string()]).is_none());
    }
}
