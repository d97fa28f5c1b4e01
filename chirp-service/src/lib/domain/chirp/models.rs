use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// Chirp aggregate root entity.
///
/// A single short post authored by a user.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub user_id: UserId,
    pub body: ChirpBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    /// Generate a new random chirp ID.
    ///
    /// # Returns
    /// ChirpId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed ChirpId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value object with validation.
///
/// Ensures the body fits the 140 character limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

/// Words masked out of chirp bodies before storage.
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const MASK: &str = "****";

impl ChirpBody {
    const MAX_LENGTH: usize = 140;

    /// Create a new validated chirp body.
    ///
    /// # Arguments
    /// * `body` - Raw chirp text
    ///
    /// # Returns
    /// Validated ChirpBody value object
    ///
    /// # Errors
    /// * `TooLong` - Body exceeds 140 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.len();
        if length > Self::MAX_LENGTH {
            Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(body))
        }
    }

    /// Mask profane words, comparing case-insensitively on whole
    /// space-separated words.
    ///
    /// # Returns
    /// ChirpBody with each profane word replaced by `****`
    pub fn censored(self) -> Self {
        let cleaned: Vec<&str> = self
            .0
            .split(' ')
            .map(|word| {
                if PROFANE_WORDS
                    .iter()
                    .any(|profane| word.eq_ignore_ascii_case(profane))
                {
                    MASK
                } else {
                    word
                }
            })
            .collect();

        Self(cleaned.join(" "))
    }

    /// Get body as string slice.
    ///
    /// # Returns
    /// Body string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChirpBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
