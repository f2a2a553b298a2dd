// ============================================================================
// CLAIMS - proyección del payload del JWT (solo para mostrar)
// ============================================================================
// Lectura tolerante: un claim con forma inesperada queda en None (o como
// texto) en vez de invalidar todo el token.
// ============================================================================

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Claim `sub`: el backend emite ids numéricos o de texto
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum SubjectId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectId::Number(n) => write!(f, "{}", n),
            SubjectId::Text(s) => f.write_str(s),
        }
    }
}

/// Texto de un claim: números se convierten a texto, listas se unen con ", "
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(value_to_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Null | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

fn lenient_subject<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SubjectId>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_i64() {
            Some(id) => Some(SubjectId::Number(id)),
            None => Some(SubjectId::Text(n.to_string())),
        },
        other => value_to_text(other).map(SubjectId::Text),
    })
}

/// NumericDate (RFC 7519): segundos, enteros o con decimales
fn lenient_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|secs| secs.is_finite()))
}

fn seconds_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt((secs * 1000.0).floor() as i64).single()
}

/// Proyección del payload del token. No otorga ninguna autoridad.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct Claims {
    #[serde(default, deserialize_with = "lenient_subject")]
    pub sub: Option<SubjectId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: Option<String>,
    /// Emitido (segundos desde epoch)
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub iat: Option<f64>,
    /// Expiración (segundos desde epoch)
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub exp: Option<f64>,
}

impl Claims {
    pub fn expires_at_ms(&self) -> Option<i64> {
        self.exp.map(|exp| (exp * 1000.0).floor() as i64)
    }

    /// Expirado cuando `now_ms` alcanza la expiración. Sin `exp` nunca expira.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.exp.map_or(false, |exp| exp * 1000.0 <= now_ms as f64)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        seconds_to_datetime(self.exp?)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        seconds_to_datetime(self.iat?)
    }

    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.sub.as_ref().map(|s| s.to_string()))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_seconds_converted_to_millis() {
        let claims = Claims { exp: Some(1_700_000_000.0), ..Claims::default() };
        assert_eq!(claims.expires_at_ms(), Some(1_700_000_000_000));
        assert!(!claims.is_expired_at(1_699_999_999_999));
        assert!(claims.is_expired_at(1_700_000_000_000));
        assert!(claims.is_expired_at(1_700_000_000_001));
    }

    #[test]
    fn missing_expiry_never_goes_stale() {
        assert!(!Claims::default().is_expired_at(i64::MAX));
    }

    #[test]
    fn fractional_numeric_dates_are_accepted() {
        let claims: Claims =
            serde_json::from_str(r#"{"iat":1700000000.5,"exp":4000000000.5}"#).unwrap();
        assert_eq!(claims.iat, Some(1_700_000_000.5));
        assert_eq!(claims.expires_at_ms(), Some(4_000_000_000_500));
        assert!(!claims.is_expired_at(4_000_000_000_499));
        assert!(claims.is_expired_at(4_000_000_000_500));
        assert_eq!(
            claims.issued_at().map(|t| t.timestamp_millis()),
            Some(1_700_000_000_500)
        );
    }

    #[test]
    fn unexpected_claim_shapes_do_not_fail_decoding() {
        let claims: Claims = serde_json::from_str(
            r#"{"sub":{"id":1},"username":null,"role":["admin","editor"],"exp":"soon","iat":true}"#,
        )
        .unwrap();
        assert_eq!(claims.sub, None);
        assert_eq!(claims.username, None);
        assert_eq!(claims.role.as_deref(), Some("admin, editor"));
        assert_eq!(claims.exp, None);
        assert_eq!(claims.iat, None);
    }

    #[test]
    fn subject_accepts_numbers_and_strings() {
        let claims: Claims = serde_json::from_str(r#"{"sub":42,"username":"ana"}"#).unwrap();
        assert_eq!(claims.sub, Some(SubjectId::Number(42)));

        let claims: Claims = serde_json::from_str(r#"{"sub":"u-42"}"#).unwrap();
        assert_eq!(claims.sub, Some(SubjectId::Text("u-42".to_string())));
        assert_eq!(claims.display_name(), "u-42");

        let claims: Claims = serde_json::from_str(r#"{"sub":7.5}"#).unwrap();
        assert_eq!(claims.sub, Some(SubjectId::Text("7.5".to_string())));
    }
}
