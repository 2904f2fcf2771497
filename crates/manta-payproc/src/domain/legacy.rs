use rust_decimal::Decimal;

/// Mints a legacy single-crypto payment URI (e.g. `bitcoin:addr?amount=1.5`)
/// for merchants that requested a specific `crypto_currency` up front
/// instead of negotiating over the full Manta protocol.
#[must_use]
pub fn mint_uri(crypto_currency: &str, destination_address: &str, amount: Decimal) -> String {
    format!(
        "{}:{}?amount={}",
        crypto_currency.to_ascii_lowercase(),
        destination_address,
        amount
    )
}
