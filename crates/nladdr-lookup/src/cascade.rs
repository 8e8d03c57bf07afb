//! Ordered fallback across postcode-lookup providers.

use reqwest::Client;

use nladdr_core::{Address, AppConfig, HouseNumber, Postcode};

use crate::error::{AttemptOutcome, LookupError, NotFoundReason, ProviderAttempt};
use crate::providers::{
    AddressProvider, NominatimProvider, OpenPostcodeProvider, PostcodeTechProvider,
};

/// Tries each provider in its fixed position until one resolves the
/// address. The first answer wins; answers are never merged.
pub struct AddressCascade {
    providers: Vec<Box<dyn AddressProvider>>,
}

impl AddressCascade {
    #[must_use]
    pub fn new(providers: Vec<Box<dyn AddressProvider>>) -> Self {
        Self { providers }
    }

    /// Default priority: `postcode_tech`, `openpostcode`, `nominatim`.
    #[must_use]
    pub fn from_config(client: &Client, config: &AppConfig) -> Self {
        Self::new(vec![
            Box::new(PostcodeTechProvider::new(
                client.clone(),
                &config.postcode_tech_url,
                config.postcode_tech_api_key.clone(),
            )),
            Box::new(OpenPostcodeProvider::new(
                client.clone(),
                &config.openpostcode_url,
            )),
            Box::new(NominatimProvider::new(client.clone(), &config.nominatim_url)),
        ])
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Validates raw input and resolves it.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Invalid`] for a malformed postcode or blank house
    ///   number; no provider is called.
    /// - [`LookupError::NotFound`] when providers answered but none resolved.
    /// - [`LookupError::AllProvidersFailed`] when no provider was usable.
    pub async fn lookup(
        &self,
        raw_postcode: &str,
        raw_house_number: &str,
    ) -> Result<Address, LookupError> {
        let postcode = Postcode::parse(raw_postcode)?;
        let house_number = HouseNumber::parse(raw_house_number)?;
        self.lookup_validated(&postcode, &house_number).await
    }

    /// # Errors
    ///
    /// See [`AddressCascade::lookup`]; validation has already happened.
    pub async fn lookup_validated(
        &self,
        postcode: &Postcode,
        house_number: &HouseNumber,
    ) -> Result<Address, LookupError> {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let name = provider.name();
            match provider.resolve(postcode, house_number).await {
                Ok(Some(address)) => {
                    tracing::debug!(
                        provider = name,
                        postcode = %postcode,
                        attempts = attempts.len(),
                        "address resolved"
                    );
                    return Ok(address);
                }
                Ok(None) => {
                    tracing::debug!(provider = name, postcode = %postcode, "no match");
                    attempts.push(ProviderAttempt {
                        provider: name.to_string(),
                        outcome: AttemptOutcome::NoMatch,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        provider = name,
                        postcode = %postcode,
                        error = %e.cause,
                        "address provider failed; trying next"
                    );
                    attempts.push(ProviderAttempt {
                        provider: name.to_string(),
                        outcome: AttemptOutcome::Failed(e.cause),
                    });
                }
            }
        }

        Err(exhausted(attempts))
    }
}

fn exhausted(attempts: Vec<ProviderAttempt>) -> LookupError {
    let any_no_match = attempts
        .iter()
        .any(|a| a.outcome == AttemptOutcome::NoMatch);
    if any_no_match {
        return LookupError::NotFound {
            reason: NotFoundReason::NoSuchAddress,
            attempts,
        };
    }

    let any_reachable = attempts.iter().any(|a| match &a.outcome {
        AttemptOutcome::Failed(cause) => !cause.is_configuration(),
        AttemptOutcome::NoMatch => true,
    });
    if any_reachable {
        return LookupError::NotFound {
            reason: NotFoundReason::ServiceUnavailable,
            attempts,
        };
    }

    tracing::error!(
        providers = attempts.len(),
        "no address provider is usable; check provider configuration"
    );
    LookupError::AllProvidersFailed { attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCause;

    fn failed(cause: ProviderErrorCause) -> ProviderAttempt {
        ProviderAttempt {
            provider: "p".to_string(),
            outcome: AttemptOutcome::Failed(cause),
        }
    }

    fn no_match() -> ProviderAttempt {
        ProviderAttempt {
            provider: "p".to_string(),
            outcome: AttemptOutcome::NoMatch,
        }
    }

    #[test]
    fn no_match_beats_errors() {
        let err = exhausted(vec![failed(ProviderErrorCause::Timeout), no_match()]);
        assert!(matches!(
            err,
            LookupError::NotFound {
                reason: NotFoundReason::NoSuchAddress,
                ..
            }
        ));
    }

    #[test]
    fn outages_mean_service_unavailable() {
        let err = exhausted(vec![
            failed(ProviderErrorCause::NotConfigured("no key".into())),
            failed(ProviderErrorCause::Upstream { status: 503 }),
        ]);
        assert!(matches!(
            err,
            LookupError::NotFound {
                reason: NotFoundReason::ServiceUnavailable,
                ..
            }
        ));
    }

    #[test]
    fn configuration_only_failures_are_all_providers_failed() {
        let err = exhausted(vec![
            failed(ProviderErrorCause::NotConfigured("no key".into())),
            failed(ProviderErrorCause::Auth { status: 401 }),
        ]);
        assert!(matches!(err, LookupError::AllProvidersFailed { ref attempts } if attempts.len() == 2));
    }

    #[test]
    fn empty_provider_list_is_all_providers_failed() {
        assert!(matches!(
            exhausted(Vec::new()),
            LookupError::AllProvidersFailed { .. }
        ));
    }
}
