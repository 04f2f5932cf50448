//! Product display metadata — name, provider, token badges.
//!
//! Products are static: they describe a spread strategy the backend knows how
//! to backtest (swap a percentage of the treasury into the product's target
//! tokens). The catalog shipped here mirrors what the hosting application
//! would otherwise pass down.

use serde::{Deserialize, Serialize};

/// Display data for a single spread product card.
///
/// `tokens` is ordered; badges render in the given order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescription {
    pub name: String,
    pub provider: String,
    pub description: String,
    pub tokens: Vec<String>,
    /// Short glyph shown next to the name (terminal stand-in for the logo).
    pub logo: String,
}

impl ProductDescription {
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        description: impl Into<String>,
        tokens: &[&str],
        logo: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            description: description.into(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            logo: logo.into(),
        }
    }

    /// Create the default product catalog.
    pub fn default_catalog() -> Vec<ProductDescription> {
        vec![
            ProductDescription::new(
                "Stable Anchor",
                "Haven Labs",
                "Park a slice of the treasury in USDC",
                &["USDC"],
                "◍",
            ),
            ProductDescription::new(
                "Dai Cushion",
                "Makerline",
                "Diversify volatile holdings into DAI",
                &["DAI"],
                "◈",
            ),
            ProductDescription::new(
                "Staked Ether Spread",
                "Lido Route",
                "Rotate part of the treasury into staked ETH",
                &["stETH", "ETH"],
                "✦",
            ),
            ProductDescription::new(
                "Blue Chip Basket",
                "Index Coop",
                "Spread into a large-cap DeFi basket",
                &["DPI", "ETH", "WBTC"],
                "❖",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_nonempty_and_badged() {
        let catalog = ProductDescription::default_catalog();
        assert!(!catalog.is_empty());
        for product in &catalog {
            assert!(!product.name.is_empty());
            assert!(!product.provider.is_empty());
            assert!(!product.tokens.is_empty());
        }
    }

    #[test]
    fn token_order_is_preserved() {
        let product =
            ProductDescription::new("Test", "Prov", "Desc", &["stETH", "ETH", "USDC"], "x");
        assert_eq!(product.tokens, vec!["stETH", "ETH", "USDC"]);
    }
}
