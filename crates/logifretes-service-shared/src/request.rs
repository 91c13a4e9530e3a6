//! Quote request payload, decoding and validation.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::error::{QuoteError, ValidationIssue};

/// Validation trait for request types.
///
/// Implementations check every field and report all violations at once
/// instead of stopping at the first one.
pub trait Validate {
    /// Validate the request, returning [`QuoteError::Validation`] with the
    /// full issue list if anything is wrong.
    fn validate(&self) -> Result<(), QuoteError>;
}

/// Failure to turn a request body into a [`QuoteRequest`].
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("failed to read request body")]
    Body(#[from] axum::Error),

    #[error("body is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Shipment description posted to `/api/cotacoes`.
///
/// Missing fields and explicit `null`s decode to zero values so that the
/// validation step, not the decoder, reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Origin address.
    #[serde(rename = "origem", default, deserialize_with = "null_as_default")]
    pub origin: Location,

    /// Destination address.
    #[serde(rename = "destino", default, deserialize_with = "null_as_default")]
    pub destination: Location,

    /// Package being shipped.
    #[serde(rename = "pacote", default, deserialize_with = "null_as_default")]
    pub package: Package,

    /// Requested service tags, e.g. `["express"]` or `["todos"]`.
    #[serde(rename = "servicos", default, deserialize_with = "null_as_default")]
    pub services: Vec<String>,
}

/// An address, reduced to its CEP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Brazilian postal code, treated as an opaque string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cep: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Weight in kilograms.
    #[serde(rename = "peso", default, deserialize_with = "null_as_default")]
    pub weight: f64,

    #[serde(rename = "dimensoes", default, deserialize_with = "null_as_default")]
    pub dimensions: Dimensions,

    /// Declared value. Never validated.
    #[serde(rename = "valor", default, deserialize_with = "null_as_default")]
    pub declared_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(rename = "altura", default, deserialize_with = "null_as_default")]
    pub height: f64,

    #[serde(rename = "largura", default, deserialize_with = "null_as_default")]
    pub width: f64,

    #[serde(rename = "comprimento", default, deserialize_with = "null_as_default")]
    pub length: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl QuoteRequest {
    /// Decode a request body.
    ///
    /// Only JSON objects are accepted; `null`, arrays and scalars are rejected
    /// even though they would otherwise fill every field with defaults.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, PayloadError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(PayloadError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Collect every validation issue in field order.
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.origin.cep.is_empty() {
            issues.push(ValidationIssue::new(
                "origem.cep",
                "CEP de origem é obrigatório",
            ));
        }

        if self.destination.cep.is_empty() {
            issues.push(ValidationIssue::new(
                "destino.cep",
                "CEP de destino é obrigatório",
            ));
        }

        let package = &self.package;
        let dimensions = &package.dimensions;
        let positive_checks = [
            (package.weight, "pacote.peso", "Peso deve ser maior que zero"),
            (
                dimensions.height,
                "pacote.dimensoes.altura",
                "Altura deve ser maior que zero",
            ),
            (
                dimensions.width,
                "pacote.dimensoes.largura",
                "Largura deve ser maior que zero",
            ),
            (
                dimensions.length,
                "pacote.dimensoes.comprimento",
                "Comprimento deve ser maior que zero",
            ),
        ];

        for (value, field, message) in positive_checks {
            if value <= 0.0 {
                issues.push(ValidationIssue::new(field, message));
            }
        }

        issues
    }
}

impl Validate for QuoteRequest {
    fn validate(&self) -> Result<(), QuoteError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(QuoteError::Validation(issues))
        }
    }
}
