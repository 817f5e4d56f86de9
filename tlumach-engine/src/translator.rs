//! The translation backend seam
//!
//! [`Translator`] is the only way the engine reaches a backend. Backends that
//! can take context as a separate field announce it with
//! [`Translator::supports_context`]; for all others the dispatcher inlines the
//! context behind a marker.

use crate::error::TranslateError;
use crate::language::LanguagePair;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One call to a translation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Preceding original text, for backends that take it separately
    pub context: Option<String>,
    /// Source and target languages
    pub pair: LanguagePair,
}

impl TranslationRequest {
    /// Create a request without context
    pub fn new(text: impl Into<String>, pair: LanguagePair) -> Self {
        Self {
            text: text.into(),
            context: None,
            pair,
        }
    }

    /// Attach structured context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// A translation backend
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `request.text` from `request.pair.source` to `request.pair.target`
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError>;

    /// Whether `request.context` is honoured as a separate field
    fn supports_context(&self) -> bool {
        false
    }

    /// Name used in logs
    fn name(&self) -> &str {
        "translator"
    }
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Arc<T> {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        (**self).translate(request).await
    }

    fn supports_context(&self) -> bool {
        (**self).supports_context()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Backend returning its input unchanged
///
/// Useful for dry runs: the relay then only re-splits the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

#[async_trait]
impl Translator for IdentityTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        Ok(request.text.clone())
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Retry settings for [`RetryingTranslator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first (at least 1)
    pub max_attempts: u32,
    /// Pause before the second attempt
    pub initial_backoff: Duration,
    /// Upper bound of the doubling pause
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// Wraps a translator with bounded retries and exponential backoff
///
/// Only errors reporting [`TranslateError::is_retryable`] are repeated. The
/// dispatcher's timeout bounds the whole retry loop.
#[derive(Debug, Clone)]
pub struct RetryingTranslator<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Translator> RetryingTranslator<T> {
    /// Wrap `inner` with the default policy
    pub fn new(inner: T) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    /// Wrap `inner` with an explicit policy
    pub fn with_policy(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped translator
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Translator> Translator for RetryingTranslator<T> {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let attempts = self.policy.max_attempts.max(1);
        let mut backoff = self.policy.initial_backoff;
        let mut attempt = 1;

        loop {
            match self.inner.translate(request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < attempts => {
                    debug!(
                        backend = self.inner.name(),
                        attempt,
                        error = %err,
                        backoff_ms = backoff.as_millis() as u64,
                        "retrying translation"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(self.policy.max_backoff);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn supports_context(&self) -> bool {
        self.inner.supports_context()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with `error` for the first `failures` calls
    struct Flaky {
        failures: u32,
        error: TranslateError,
        calls: AtomicU32,
    }

    #[async_trait]
    impl Translator for Flaky {
        async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(self.error.clone())
            } else {
                Ok(request.text.to_uppercase())
            }
        }
    }

    fn request() -> TranslationRequest {
        TranslationRequest::new("hello", LanguagePair::auto("uk"))
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers() {
        let translator = RetryingTranslator::new(Flaky {
            failures: 2,
            error: TranslateError::Transport("reset".into()),
            calls: AtomicU32::new(0),
        });
        assert_eq!(translator.translate(&request()).await.unwrap(), "HELLO");
        assert_eq!(translator.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up() {
        let translator = RetryingTranslator::with_policy(
            Flaky {
                failures: 10,
                error: TranslateError::RateLimited,
                calls: AtomicU32::new(0),
            },
            RetryPolicy {
                max_attempts: 2,
                ..Default::default()
            },
        );
        assert_eq!(
            translator.translate(&request()).await,
            Err(TranslateError::RateLimited)
        );
        assert_eq!(translator.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_fails_fast() {
        let translator = RetryingTranslator::new(Flaky {
            failures: 1,
            error: TranslateError::Malformed("html".into()),
            calls: AtomicU32::new(0),
        });
        assert!(translator.translate(&request()).await.is_err());
        assert_eq!(translator.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_identity_and_arc() {
        let translator: Arc<dyn Translator> = Arc::new(IdentityTranslator);
        assert_eq!(translator.translate(&request()).await.unwrap(), "hello");
        assert!(!translator.supports_context());
        assert_eq!(translator.name(), "identity");
    }
}
