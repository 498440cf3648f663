// src/coin_info.rs

/// A tracked asset symbol and the alias terms used to search for it.
/// Some aliases are plain names, others are already `$`/`#` tag tokens.
#[derive(Debug, Clone)]
pub struct CoinInfo {
    pub symbol: String,
    pub aliases: Vec<String>,
}

impl CoinInfo {
    pub fn new(symbol: &str, aliases: &[&str]) -> Self {
        CoinInfo {
            symbol: symbol.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        }
    }
}
