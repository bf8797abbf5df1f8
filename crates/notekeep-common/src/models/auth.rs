use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an authenticated user.
///
/// Only the authorization extractor produces one from a verified token; note
/// operations take it as their owner argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_serializes_as_plain_integer() {
        let value = serde_json::to_value(UserId(42)).unwrap();
        assert_eq!(value, serde_json::json!(42));
    }

    #[test]
    fn test_claims_field_names() {
        let claims = Claims {
            user_id: 7,
            iat: 100,
            exp: 200,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["user_id"], 7);
        assert_eq!(value["iat"], 100);
        assert_eq!(value["exp"], 200);
    }
}
