//! Session registry: short session codes mapped to their hosting connection.

use std::collections::HashMap;

use sharecast_common::{new_session_code, ConnectionId, SessionCode, SignalError};

#[derive(Debug)]
pub struct SessionRegistry {
    by_code: HashMap<SessionCode, ConnectionId>,
    code_length: usize,
    max_attempts: u32,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(5, 16)
    }
}

impl SessionRegistry {
    pub fn new(code_length: usize, max_attempts: u32) -> Self {
        Self {
            by_code: HashMap::new(),
            code_length,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Issue a fresh code for `host`, re-rolling on collision with any
    /// active code.
    pub fn create_session(&mut self, host: &ConnectionId) -> Result<SessionCode, SignalError> {
        let len = self.code_length;
        self.create_session_with(host, || new_session_code(len))
    }

    /// Same as [`create_session`](Self::create_session) with a caller-supplied
    /// code generator.
    pub fn create_session_with<F>(
        &mut self,
        host: &ConnectionId,
        mut generate: F,
    ) -> Result<SessionCode, SignalError>
    where
        F: FnMut() -> SessionCode,
    {
        for _ in 0..self.max_attempts {
            let code = generate();
            if self.by_code.contains_key(&code) {
                continue;
            }
            self.by_code.insert(code.clone(), host.clone());
            return Ok(code);
        }

        Err(SignalError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    pub fn resolve(&self, code: &SessionCode) -> Option<ConnectionId> {
        self.by_code.get(code).cloned()
    }

    /// Remove every code pointing at `host`. Returns the removed codes.
    pub fn remove_all_for(&mut self, host: &ConnectionId) -> Vec<SessionCode> {
        let codes = self.codes_for(host);
        for code in &codes {
            self.by_code.remove(code);
        }
        codes
    }

    pub fn codes_for(&self, host: &ConnectionId) -> Vec<SessionCode> {
        self.by_code
            .iter()
            .filter(|(_, h)| *h == host)
            .map(|(code, _)| code.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn create_then_resolve() {
        let mut registry = SessionRegistry::default();
        let host = ConnectionId::from("host");

        let code = registry.create_session(&host).unwrap();
        assert_eq!(code.as_str().len(), 5);
        assert_eq!(registry.resolve(&code), Some(host));
    }

    #[test]
    fn resolve_unknown_code_is_none() {
        let registry = SessionRegistry::default();
        assert_eq!(registry.resolve(&SessionCode::from("nonexistent")), None);
    }

    #[test]
    fn collision_is_retried_internally() {
        let mut registry = SessionRegistry::new(5, 4);
        let a = ConnectionId::from("a");
        let b = ConnectionId::from("b");

        registry
            .create_session_with(&a, || SessionCode::from("aaaaa"))
            .unwrap();

        let mut rolls = vec![SessionCode::from("bbbbb"), SessionCode::from("aaaaa")];
        let code = registry
            .create_session_with(&b, || rolls.pop().unwrap())
            .unwrap();

        assert_eq!(code, SessionCode::from("bbbbb"));
        assert_eq!(registry.resolve(&SessionCode::from("aaaaa")), Some(a));
        assert_eq!(registry.resolve(&code), Some(b));
    }

    #[test]
    fn exhausted_attempts_are_reported_without_mutation() {
        let mut registry = SessionRegistry::new(5, 3);
        let a = ConnectionId::from("a");
        registry
            .create_session_with(&a, || SessionCode::from("same1"))
            .unwrap();

        let mut calls = 0;
        let err = registry
            .create_session_with(&ConnectionId::from("b"), || {
                calls += 1;
                SessionCode::from("same1")
            })
            .unwrap_err();

        assert_eq!(err, SignalError::CodeSpaceExhausted { attempts: 3 });
        assert_eq!(calls, 3);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn many_sessions_get_distinct_codes() {
        // Four hex digits make collisions likely enough to exercise re-rolls.
        let mut registry = SessionRegistry::new(4, 64);
        let host = ConnectionId::from("h");
        let codes: HashSet<SessionCode> = (0..500)
            .map(|_| registry.create_session(&host).unwrap())
            .collect();
        assert_eq!(codes.len(), 500);
        assert_eq!(registry.len(), 500);
    }

    #[test]
    fn remove_all_for_drops_every_code_of_host() {
        let mut registry = SessionRegistry::default();
        let host = ConnectionId::from("host");
        let other = ConnectionId::from("other");

        let first = registry.create_session(&host).unwrap();
        let second = registry.create_session(&host).unwrap();
        let kept = registry.create_session(&other).unwrap();

        let mut removed = registry.remove_all_for(&host);
        removed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        let mut expected = vec![first.clone(), second.clone()];
        expected.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(removed, expected);

        assert_eq!(registry.resolve(&first), None);
        assert_eq!(registry.resolve(&second), None);
        assert_eq!(registry.resolve(&kept), Some(other));
        assert!(registry.codes_for(&host).is_empty());
    }

    #[test]
    fn remove_all_for_is_idempotent() {
        let mut registry = SessionRegistry::default();
        let host = ConnectionId::from("host");
        registry.create_session(&host).unwrap();

        assert_eq!(registry.remove_all_for(&host).len(), 1);
        assert!(registry.remove_all_for(&host).is_empty());
        assert!(registry.is_empty());
    }
}
