//! Verification token checks
//!
//! [`parse_event`](crate::parse_event) takes a list of [`ParseOption`]s. Each
//! option is a pure `VerificationConfig -> VerificationConfig` step, applied
//! left to right over a config seeded with the envelope's token. A payload is
//! trusted only if the final config is marked verified, so an empty option
//! list always fails closed.

use subtle::ConstantTimeEq;
use tracing::warn;

/// Checks a candidate verification token
#[cfg_attr(test, mockall::automock)]
pub trait Verifier: Send + Sync {
    /// Whether `token` is accepted
    fn verify(&self, token: &str) -> bool;
}

/// Constant-time comparison against an expected verification token
#[derive(Clone)]
pub struct TokenComparator {
    verification_token: String,
}

impl TokenComparator {
    /// Create a comparator for the expected token
    #[must_use]
    pub fn new(verification_token: impl Into<String>) -> Self {
        Self {
            verification_token: verification_token.into(),
        }
    }
}

impl std::fmt::Debug for TokenComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenComparator")
            .field("verification_token", &"[REDACTED]")
            .finish()
    }
}

impl Verifier for TokenComparator {
    fn verify(&self, token: &str) -> bool {
        // Differing lengths short-circuit; only the length leaks.
        bool::from(
            self.verification_token
                .as_bytes()
                .ct_eq(token.as_bytes()),
        )
    }
}

/// Per-call verification state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Token taken from the envelope being verified
    pub verification_token: String,
    /// Whether any option accepted the token
    pub token_verified: bool,
}

impl VerificationConfig {
    /// Unverified config for an envelope token
    #[must_use]
    pub fn new(verification_token: impl Into<String>) -> Self {
        Self {
            verification_token: verification_token.into(),
            token_verified: false,
        }
    }

    /// Apply options left to right
    #[must_use]
    pub fn apply(self, options: &[ParseOption]) -> Self {
        options.iter().fold(self, |cfg, opt| opt(cfg))
    }
}

/// A verification step applied by [`parse_event`](crate::parse_event)
pub type ParseOption = Box<dyn Fn(VerificationConfig) -> VerificationConfig + Send + Sync>;

/// Verify the envelope token with `verifier`
pub fn verify_token<V>(verifier: V) -> ParseOption
where
    V: Verifier + 'static,
{
    Box::new(move |cfg| {
        let token_verified = verifier.verify(&cfg.verification_token);
        if !token_verified {
            warn!("Events API verification token rejected");
        }
        VerificationConfig {
            token_verified,
            ..cfg
        }
    })
}

/// Skip token verification.
///
/// For deployments that authenticate requests by signature instead of by the
/// legacy verification token.
pub fn no_verify_token() -> ParseOption {
    Box::new(|cfg| VerificationConfig {
        token_verified: true,
        ..cfg
    })
}
