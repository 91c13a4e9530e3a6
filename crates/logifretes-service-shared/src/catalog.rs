//! Static quote catalog.
//!
//! Prices and lead times are constants; nothing is computed from the package.

use serde::{Deserialize, Serialize};

/// Service-list value that selects the whole catalog.
pub const ALL_SERVICES_SENTINEL: &str = "todos";

/// Catalog entries in response order.
pub const CATALOG: [ServiceLevel; 3] = [
    ServiceLevel::Standard,
    ServiceLevel::Express,
    ServiceLevel::Economic,
];

/// Shipping service levels offered by the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLevel {
    Standard,
    Express,
    Economic,
}

impl ServiceLevel {
    /// Tag used in the `servicos` list and the `tipo` field.
    pub fn tag(self) -> &'static str {
        match self {
            ServiceLevel::Standard => "standard",
            ServiceLevel::Express => "express",
            ServiceLevel::Economic => "economic",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ServiceLevel::Standard => "STD",
            ServiceLevel::Express => "EXP",
            ServiceLevel::Economic => "ECO",
        }
    }

    /// Price in BRL.
    pub fn price(self) -> f64 {
        match self {
            ServiceLevel::Standard => 28.50,
            ServiceLevel::Express => 42.75,
            ServiceLevel::Economic => 19.99,
        }
    }

    pub fn lead_time_days(self) -> u32 {
        match self {
            ServiceLevel::Standard => 3,
            ServiceLevel::Express => 1,
            ServiceLevel::Economic => 5,
        }
    }

    /// Look up a service by its exact tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        CATALOG.into_iter().find(|service| service.tag() == tag)
    }

    /// Full quote record for this service.
    pub fn quote(self) -> Quote {
        Quote {
            service: self,
            code: self.code().to_string(),
            price: self.price(),
            lead_time_days: self.lead_time_days(),
            region_available: true,
        }
    }
}

impl std::fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A priced shipping option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "tipo")]
    pub service: ServiceLevel,

    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "valor")]
    pub price: f64,

    #[serde(rename = "prazo_dias")]
    pub lead_time_days: u32,

    #[serde(rename = "regiao_disponivel")]
    pub region_available: bool,
}

/// Pick the catalog quotes for a requested service list.
///
/// An empty list or exactly `["todos"]` yields the whole catalog. Otherwise
/// every catalog entry whose tag is requested is returned once, in catalog
/// order. Unknown tags are ignored.
pub fn select_quotes<S: AsRef<str>>(requested: &[S]) -> Vec<Quote> {
    let wants_all = match requested {
        [] => true,
        [only] => only.as_ref() == ALL_SERVICES_SENTINEL,
        _ => false,
    };

    CATALOG
        .into_iter()
        .filter(|service| wants_all || requested.iter().any(|tag| tag.as_ref() == service.tag()))
        .map(ServiceLevel::quote)
        .collect()
}
