//! Text-backed domain enums.
//!
//! Every enum here is stored as an upper-case `TEXT` column guarded by a
//! `CHECK` constraint in the migrations, and travels over the wire as the
//! same upper-case string. [`define_text_enum!`] generates the string
//! conversions, serde impls and the list of accepted values so the API can
//! report them in validation messages.

/// Generate a text-backed enum with `as_str`, `FromStr`, `Display` and serde.
#[macro_export]
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The canonical stored / wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Parse a stored value, reporting the accepted set on failure.
            pub fn parse(value: &str) -> Result<Self, $crate::error::CoreError> {
                value.parse()
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => {
                        let accepted: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        Err($crate::error::CoreError::Validation(format!(
                            "Invalid {} '{}'. Must be one of: {}",
                            stringify!($name),
                            other,
                            accepted.join(", ")
                        )))
                    }
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::error::CoreError;

    define_text_enum! {
        Colour {
            Red = "RED",
            DarkBlue = "DARK_BLUE",
        }
    }

    #[test]
    fn parses_known_values() {
        assert_eq!(Colour::parse("RED").unwrap(), Colour::Red);
        assert_eq!(Colour::parse("DARK_BLUE").unwrap(), Colour::DarkBlue);
    }

    #[test]
    fn rejects_unknown_value_with_accepted_list() {
        let err = Colour::parse("red").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("RED, DARK_BLUE"));
    }

    #[test]
    fn serde_uses_stored_text() {
        let json = serde_json::to_string(&Colour::DarkBlue).unwrap();
        assert_eq!(json, "\"DARK_BLUE\"");
        let back: Colour = serde_json::from_str("\"RED\"").unwrap();
        assert_eq!(back, Colour::Red);
    }
}
