use thiserror::Error;

/// The OS process locale could not be applied. Setting the process locale is
/// a best-effort side effect; the resolver logs this and proceeds with
/// translation binding.
#[derive(Debug, Clone, Error)]
#[error("failed to set process locale '{locale}': {reason}")]
pub struct LocaleSetError {
    pub locale: String,
    pub reason: String,
}

/// The OS locale primitive. Implemented by the embedding service with
/// whatever native binding it has available (`setlocale` on glibc systems).
pub trait SystemLocale: Send + Sync {
    fn set_process_locale(&self, locale: &str) -> Result<(), LocaleSetError>;
}

/// Backend for embedders without native locale support. Accepts every locale
/// and changes nothing; collation and number formatting stay in the locale
/// the process started with.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLocale;

impl SystemLocale for NullLocale {
    fn set_process_locale(&self, locale: &str) -> Result<(), LocaleSetError> {
        tracing::debug!("process locale left unchanged (null backend): {locale}");
        Ok(())
    }
}
