use serde::Serialize;
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a value the grammar has already admitted.
            pub(crate) fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrows the underlying string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwraps the underlying string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    NamespaceId,
    "Namespace ID admitted by [`Grammar::parse_namespace`](crate::Grammar::parse_namespace)."
);
newtype!(
    Name,
    "Fully-qualified `<name>.<namespace_id>` admitted by [`Grammar::parse_name`](crate::Grammar::parse_name)."
);

impl Name {
    /// The part before the separator.
    pub fn name_part(&self) -> &str {
        crate::grammar::name_part_of(&self.0).unwrap_or_default()
    }

    /// The namespace ID after the separator.
    pub fn namespace_id(&self) -> NamespaceId {
        NamespaceId::new(crate::grammar::namespace_of(&self.0))
    }
}

/// A `<subdomain>.<name>.<namespace_id>` address split by the subdomain pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Subdomain {
    /// First capture group: the subdomain label.
    pub subdomain_name: String,
    /// Second capture group: the enclosing domain name.
    pub domain: String,
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.subdomain_name, self.domain)
    }
}
