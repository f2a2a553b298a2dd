// ============================================================================
// SESSION STORE - persistencia del token + claims para mostrar
// ============================================================================
// Único módulo que lee o escribe la clave del token. Los claims se decodifican
// sin verificar la firma y solo se usan para mostrar.
// ============================================================================

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use crate::errors::{StorageError, TokenError};
use crate::models::Claims;
use crate::utils::{BrowserStorage, KeyValueStore, TOKEN_STORAGE_KEY};

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionStatus {
    Authenticated(Claims),
    #[default]
    Unauthenticated,
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated(_))
    }

    pub fn claims(&self) -> Option<&Claims> {
        match self {
            SessionStatus::Authenticated(claims) => Some(claims),
            SessionStatus::Unauthenticated => None,
        }
    }
}

/// Decodificar el segmento central (payload) del JWT
fn decode_payload(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Segments(segments.len()));
    }

    let payload = URL_SAFE_LENIENT
        .decode(segments[1])
        .or_else(|_| STANDARD_LENIENT.decode(segments[1]))?;

    Ok(serde_json::from_slice(&payload)?)
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore<S = BrowserStorage> {
    storage: S,
}

impl SessionStore<BrowserStorage> {
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn save(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(TOKEN_STORAGE_KEY, token)?;
        log::info!("💾 [SESSION] Token guardado");
        Ok(())
    }

    pub fn read(&self) -> Option<String> {
        self.storage.get(TOKEN_STORAGE_KEY)
    }

    /// Idempotente: limpiar un store vacío no hace nada
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_STORAGE_KEY)?;
        log::info!("🗑️ [SESSION] Token eliminado");
        Ok(())
    }

    /// Claims del token, sin verificar firma
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode_payload(token)
    }

    /// Guard al montar una página. Tokens malformados o expirados se borran.
    pub fn check(&self, now_ms: i64) -> SessionStatus {
        let Some(token) = self.read() else {
            return SessionStatus::Unauthenticated;
        };

        match self.decode(&token) {
            Ok(claims) if claims.is_expired_at(now_ms) => {
                log::info!("⏰ [SESSION] Token expirado para {}", claims.display_name());
                self.discard();
                SessionStatus::Unauthenticated
            }
            Ok(claims) => SessionStatus::Authenticated(claims),
            Err(e) => {
                log::warn!("⚠️ [SESSION] Token inválido: {}", e);
                self.discard();
                SessionStatus::Unauthenticated
            }
        }
    }

    pub fn check_now(&self) -> SessionStatus {
        self.check(chrono::Utc::now().timestamp_millis())
    }

    fn discard(&self) {
        if let Err(e) = self.clear() {
            log::error!("❌ [SESSION] Error limpiando token: {}", e);
        }
    }
}
