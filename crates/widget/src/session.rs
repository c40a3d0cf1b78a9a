use std::fmt;

use uuid::Uuid;

pub const SESSION_ID_PREFIX: &str = "omni_session_";
const SESSION_SUFFIX_LEN: usize = 9;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque conversation scope sent with every request.
///
/// Not a credential: it only groups turns on the backend and is never
/// regenerated for the lifetime of a widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
}

impl Session {
    pub fn new() -> Self {
        let suffix = encode_base36(Uuid::new_v4().as_u128(), SESSION_SUFFIX_LEN);
        Self {
            id: SessionId(format!("{SESSION_ID_PREFIX}{suffix}")),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// Least significant digits first; uuid v4 keeps its fixed version bits high.
fn encode_base36(mut value: u128, len: usize) -> String {
    let mut digits = String::with_capacity(len);
    for _ in 0..len {
        digits.push(BASE36_DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits
}
