use serde::{Deserialize, Serialize};

/// Kind of item held by a secure store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    /// A named secret string (username, password, token).
    GenericCredential,
    /// Private key material addressed by an application tag.
    AsymmetricKey,
}

/// Algorithm family of a stored key item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    Rsa,
}

/// What a lookup should hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    /// Only report whether a match exists.
    Nothing,
    /// The stored payload bytes.
    Data,
    /// A reference to the whole item (used for keys).
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLimit {
    One,
    All,
}

/// Typed description of a secure store query.
///
/// Every field the store understands is enumerated here; there is no
/// open-ended attribute map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreQuery {
    pub class: ItemClass,
    /// Account name for credentials, application tag for keys.
    pub identifier: String,
    pub key_type: Option<KeyType>,
    pub return_shape: ReturnShape,
    pub match_limit: MatchLimit,
}

impl StoreQuery {
    /// Query for a generic credential stored under `account`.
    pub fn credential(account: &str) -> Self {
        Self {
            class: ItemClass::GenericCredential,
            identifier: account.to_string(),
            key_type: None,
            return_shape: ReturnShape::Nothing,
            match_limit: MatchLimit::All,
        }
    }

    /// Query for a key item carrying the given application tag.
    pub fn key(tag: &str, key_type: KeyType) -> Self {
        Self {
            class: ItemClass::AsymmetricKey,
            identifier: tag.to_string(),
            key_type: Some(key_type),
            return_shape: ReturnShape::Nothing,
            match_limit: MatchLimit::All,
        }
    }

    pub fn returning(mut self, shape: ReturnShape) -> Self {
        self.return_shape = shape;
        self
    }

    pub fn limit(mut self, limit: MatchLimit) -> Self {
        self.match_limit = limit;
        self
    }

    /// Whether a stored item is selected by this query.
    pub fn matches(&self, item: &StoredItem) -> bool {
        item.class == self.class
            && item.identifier == self.identifier
            && self.key_type.is_none_or(|kt| item.key_type == Some(kt))
    }
}

/// One item as persisted by a secure store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub class: ItemClass,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<KeyType>,
    #[serde(with = "crate::core::models::base64_bytes")]
    pub data: Vec<u8>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl StoredItem {
    /// Build a new item from a query and its payload.
    pub fn from_query(query: &StoreQuery, payload: &[u8]) -> Self {
        Self {
            class: query.class,
            identifier: query.identifier.clone(),
            key_type: query.key_type,
            data: payload.to_vec(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Shape the item according to the query's requested return shape.
    pub fn shaped(&self, shape: ReturnShape) -> Self {
        match shape {
            ReturnShape::Data | ReturnShape::Reference => self.clone(),
            ReturnShape::Nothing => Self {
                data: Vec::new(),
                ..self.clone()
            },
        }
    }
}

/// Non-success status reported by a secure store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// An item with the same class and identifier already exists.
    DuplicateItem,
    /// No item matched the query.
    ItemNotFound,
    /// The query itself is malformed (e.g. empty identifier).
    InvalidQuery,
    /// The backing storage could not be read or written.
    Unavailable,
    /// The backing storage exists but could not be decrypted or parsed.
    Corrupted,
}

impl StoreStatus {
    /// Stable numeric code, printed next to the message.
    pub fn code(self) -> i32 {
        match self {
            Self::DuplicateItem => -25299,
            Self::ItemNotFound => -25300,
            Self::InvalidQuery => -50,
            Self::Unavailable => -25291,
            Self::Corrupted => -26275,
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::DuplicateItem => "item already exists",
            Self::ItemNotFound => "item not found",
            Self::InvalidQuery => "invalid query",
            Self::Unavailable => "store unavailable",
            Self::Corrupted => "store data corrupted",
        };
        write!(f, "{msg} ({})", self.code())
    }
}
