//! Postcode-lookup provider adapters.
//!
//! Each adapter turns a validated postcode and house number into one HTTP
//! request against its provider and maps the response onto [`Address`]
//! through its own static [`AliasTable`](crate::alias::AliasTable).

pub mod nominatim;
pub mod openpostcode;
pub mod postcode_tech;

use async_trait::async_trait;

use nladdr_core::{Address, HouseNumber, Postcode};

use crate::error::ProviderResult;

pub use nominatim::NominatimProvider;
pub use openpostcode::OpenPostcodeProvider;
pub use postcode_tech::PostcodeTechProvider;

/// One member of the address-resolution cascade.
///
/// `Ok(None)` means the provider understood the request but has no such
/// address; `Err` means the call itself failed.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Stable identifier used in logs and in [`Address::source`].
    fn name(&self) -> &str;

    async fn resolve(
        &self,
        postcode: &Postcode,
        house_number: &HouseNumber,
    ) -> ProviderResult<Address>;
}
