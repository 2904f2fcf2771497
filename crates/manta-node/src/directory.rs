use std::collections::HashMap;

use async_trait::async_trait;
use manta_payproc::{MerchantDirectory, PayProcError};
use manta_types::{Destination, Merchant};
use rust_decimal::Decimal;

/// A fixed-rate merchant directory for demonstration and local testing.
///
/// A real deployment replaces this with exchange-rate lookups and merchant
/// account configuration; it is intentionally the thinnest possible
/// implementation of the [`MerchantDirectory`] port.
pub struct DemoDirectory {
    merchant: Merchant,
    addresses: HashMap<String, String>,
    rates: HashMap<String, Decimal>,
}

impl DemoDirectory {
    #[must_use]
    pub fn new(merchant_name: impl Into<String>) -> Self {
        let mut addresses = HashMap::new();
        addresses.insert("NANO".to_string(), "nano_1demo0000000000000000000000000000000000000000000000000000".to_string());
        addresses.insert("BTC".to_string(), "bc1qdemo0000000000000000000000000000".to_string());

        let mut rates = HashMap::new();
        rates.insert("NANO".to_string(), Decimal::new(5, 2));
        rates.insert("BTC".to_string(), Decimal::new(1, 5));

        Self {
            merchant: Merchant::new(merchant_name, None),
            addresses,
            rates,
        }
    }
}

#[async_trait]
impl MerchantDirectory for DemoDirectory {
    fn merchant(&self) -> Merchant {
        self.merchant.clone()
    }

    async fn destinations_for(
        &self,
        fiat_amount: Decimal,
        _fiat_currency: &str,
        crypto_currency: Option<&str>,
    ) -> Result<Vec<Destination>, PayProcError> {
        let currencies: Vec<&String> = match crypto_currency {
            Some(wanted) => self
                .addresses
                .keys()
                .filter(|c| c.eq_ignore_ascii_case(wanted))
                .collect(),
            None => self.addresses.keys().collect(),
        };

        Ok(currencies
            .into_iter()
            .filter_map(|currency| {
                let rate = self.rates.get(currency)?;
                let address = self.addresses.get(currency)?;
                Some(Destination::new(fiat_amount * *rate, address.clone(), currency.clone()))
            })
            .collect())
    }
}
