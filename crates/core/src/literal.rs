//! Closed enumerations persisted as string literals.
//!
//! Each variant maps to the exact literal stored in its `TEXT` column (and
//! accepted by the column's CHECK constraint), so values round-trip
//! unchanged between Rust and Postgres.

macro_rules! define_literal_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $lit)] $variant ),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The literal stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $lit ),+
                }
            }

            /// Parse a stored literal.
            pub fn from_str_value(s: &str) -> Result<Self, String> {
                match s {
                    $( $lit => Ok($name::$variant), )+
                    _ => Err(format!(
                        "Invalid {} '{s}'. Must be one of: {}",
                        stringify!($name),
                        [$( $lit ),+].join(", ")
                    )),
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
