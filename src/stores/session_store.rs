// ============================================================================
// SESSION STORE - Persistencia token + identidad por tipo de actor
// ============================================================================
// Nunca expone un token sin su identidad: lectura exige ambas claves,
// escritura deshace ambas si alguna falla.
// ============================================================================

use std::rc::Rc;

use crate::errors::StorageError;
use crate::models::ActorKind;
use crate::utils::storage::StorageBackend;

/// Sesión leída de storage
#[derive(Clone, Debug, PartialEq)]
pub struct StoredSession<I> {
    pub token: String,
    pub identity: I,
}

/// Compartido por todo el proceso; cada manager escribe solo sus claves
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn read<K: ActorKind>(&self) -> Option<StoredSession<K::Identity>> {
        let token = self.backend.get_item(K::TOKEN_KEY);
        let raw_identity = self.backend.get_item(K::IDENTITY_KEY);

        match (token, raw_identity) {
            (None, None) => None,
            (Some(token), Some(raw)) if !token.is_empty() => {
                match serde_json::from_str::<K::Identity>(&raw) {
                    Ok(identity) => Some(StoredSession { token, identity }),
                    Err(e) => {
                        log::warn!(
                            "⚠️ [STORE] Identidad {} corrupta ({}), limpiando sesión",
                            K::LABEL,
                            e
                        );
                        self.clear::<K>();
                        None
                    }
                }
            }
            _ => {
                // Una sola de las dos claves (o token vacío): estado huérfano
                log::warn!("⚠️ [STORE] Sesión {} incompleta, limpiando", K::LABEL);
                self.clear::<K>();
                None
            }
        }
    }

    pub fn write<K: ActorKind>(&self, token: &str, identity: &K::Identity) -> Result<(), StorageError> {
        let json = serde_json::to_string(identity).map_err(|_| StorageError::Write {
            key: K::IDENTITY_KEY.to_string(),
        })?;

        let result = self
            .backend
            .set_item(K::IDENTITY_KEY, &json)
            .and_then(|_| self.backend.set_item(K::TOKEN_KEY, token));

        if let Err(e) = result {
            log::error!("❌ [STORE] Error guardando sesión {}: {}", K::LABEL, e);
            self.clear::<K>();
            return Err(e);
        }

        log::debug!("💾 [STORE] Sesión {} guardada", K::LABEL);
        Ok(())
    }

    pub fn clear<K: ActorKind>(&self) {
        // Token primero: sin token la identidad sola nunca se considera sesión
        for key in [K::TOKEN_KEY, K::IDENTITY_KEY] {
            if let Err(e) = self.backend.remove_item(key) {
                log::warn!("⚠️ [STORE] {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Staff};
    use crate::testing::{alice, bob};
    use crate::utils::storage::MemoryStorage;

    fn store() -> (SessionStore, MemoryStorage) {
        let memory = MemoryStorage::new();
        (SessionStore::new(Rc::new(memory.clone())), memory)
    }

    #[test]
    fn empty_storage_reads_as_absent() {
        let (store, _) = store();
        assert_eq!(store.read::<Staff>(), None);
        assert_eq!(store.read::<Client>(), None);
    }

    #[test]
    fn write_then_read_uses_actor_scoped_keys() {
        let (store, memory) = store();
        store.write::<Staff>("abc", &alice()).unwrap();

        assert_eq!(memory.get_item("token").as_deref(), Some("abc"));
        assert_eq!(
            store.read::<Staff>(),
            Some(StoredSession { token: "abc".to_string(), identity: alice() })
        );
        // La sesión de staff no es visible como sesión cliente
        assert_eq!(store.read::<Client>(), None);
    }

    #[test]
    fn malformed_identity_is_absent_and_cleared() {
        let (store, memory) = store();
        memory.set_item("client_token", "xyz").unwrap();
        memory.set_item("client_user", "{not json").unwrap();

        assert_eq!(store.read::<Client>(), None);
        assert!(memory.is_empty());
    }

    #[test]
    fn token_without_identity_is_treated_as_absent() {
        let (store, memory) = store();
        memory.set_item("token", "abc").unwrap();

        assert_eq!(store.read::<Staff>(), None);
        assert_eq!(memory.get_item("token"), None);
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let (store, memory) = store();
        memory.set_read_only(true);

        assert!(store.write::<Staff>("abc", &alice()).is_err());
        assert!(memory.is_empty());
        assert_eq!(store.read::<Staff>(), None);
    }

    #[test]
    fn clear_only_touches_its_own_actor_kind() {
        let (store, _) = store();
        store.write::<Staff>("abc", &alice()).unwrap();
        store.write::<Client>("xyz", &bob()).unwrap();

        store.clear::<Staff>();

        assert_eq!(store.read::<Staff>(), None);
        assert_eq!(store.read::<Client>().map(|s| s.token).as_deref(), Some("xyz"));
    }
}
