//! Common macro for implementing ID wrapper types.

/// A string that is not a UUID was offered as an id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id: {0:?}")]
pub struct InvalidId(pub String);

macro_rules! impl_id {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                pub fn new() -> Self {
                    Self(uuid::Uuid::new_v4().to_string())
                }

                /// Parse a string back into an id, rejecting anything that is not a UUID.
                pub fn parse(s: &str) -> Option<Self> {
                    uuid::Uuid::parse_str(s)
                        .ok()
                        .map(|uuid| Self(uuid.hyphenated().to_string()))
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn into_inner(self) -> String {
                    self.0
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl TryFrom<String> for $name {
                type Error = $crate::ids::InvalidId;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::parse(&value).ok_or($crate::ids::InvalidId(value))
                }
            }

            impl From<$name> for String {
                fn from(id: $name) -> String {
                    id.0
                }
            }
        )*
    };
}

pub(crate) use impl_id;
