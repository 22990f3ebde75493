//! Option sets controlling decomposition and composition.
//!
//! Both sets default to "everything enabled".

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

macro_rules! flag_set {
    (
        $(#[$set_meta:meta])*
        $set:ident,
        $(#[$flag_meta:meta])*
        $flag:ident {
            $( $(#[$variant_meta:meta])* $variant:ident = $name:literal, )+
        }
    ) => {
        $(#[$flag_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $flag {
            $( $(#[$variant_meta])* $variant, )+
        }

        impl $flag {
            /// Every flag, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the `snake_case` name of this flag.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Looks up a flag by its [`name`](Self::name).
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|flag| flag.name() == name)
            }

            const fn bit(self) -> u8 {
                1 << (self as u8)
            }
        }

        $(#[$set_meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $set(u8);

        impl $set {
            /// A set with every flag enabled.
            #[must_use]
            pub const fn all() -> Self {
                Self(0 $(| $flag::$variant.bit())+)
            }

            /// A set with no flag enabled.
            #[must_use]
            pub const fn empty() -> Self {
                Self(0)
            }

            /// Returns true if `flag` is enabled.
            #[must_use]
            pub const fn contains(self, flag: $flag) -> bool {
                self.0 & flag.bit() != 0
            }

            /// Returns true if every flag in `flags` is enabled.
            #[must_use]
            pub fn contains_all(self, flags: &[$flag]) -> bool {
                flags.iter().all(|&flag| self.contains(flag))
            }

            /// Returns a copy with `flag` enabled.
            #[must_use]
            pub const fn with(self, flag: $flag) -> Self {
                Self(self.0 | flag.bit())
            }

            /// Returns a copy with `flag` disabled.
            #[must_use]
            pub const fn without(self, flag: $flag) -> Self {
                Self(self.0 & !flag.bit())
            }

            /// Returns true if no flag is enabled.
            #[must_use]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Iterates over the enabled flags in declaration order.
            pub fn iter(self) -> impl Iterator<Item = $flag> {
                $flag::ALL
                    .iter()
                    .copied()
                    .filter(move |&flag| self.contains(flag))
            }
        }

        impl Default for $set {
            fn default() -> Self {
                Self::all()
            }
        }

        impl From<$flag> for $set {
            fn from(flag: $flag) -> Self {
                Self::empty().with(flag)
            }
        }

        impl FromIterator<$flag> for $set {
            fn from_iter<I: IntoIterator<Item = $flag>>(iter: I) -> Self {
                iter.into_iter().fold(Self::empty(), Self::with)
            }
        }

        impl BitOr<$flag> for $set {
            type Output = Self;

            fn bitor(self, flag: $flag) -> Self {
                self.with(flag)
            }
        }

        impl BitOr for $set {
            type Output = Self;

            fn bitor(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }
        }

        impl BitOrAssign<$flag> for $set {
            fn bitor_assign(&mut self, flag: $flag) {
                *self = self.with(flag);
            }
        }

        impl fmt::Debug for $set {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.iter().map($flag::name)).finish()
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $set {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_seq(self.iter().map($flag::name))
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $set {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let names = Vec::<String>::deserialize(deserializer)?;
                names
                    .iter()
                    .map(|name| {
                        $flag::from_name(name).ok_or_else(|| {
                            serde::de::Error::custom(format!("unknown flag '{name}'"))
                        })
                    })
                    .collect()
            }
        }
    };
}

flag_set! {
    /// Options for [`decompose_uri`](crate::decompose_uri).
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_decompose::{DecomposeFlag, DecomposeFlags};
    ///
    /// let flags = DecomposeFlags::all().without(DecomposeFlag::UseWellKnownPortNumbers);
    /// assert!(!flags.contains(DecomposeFlag::UseWellKnownPortNumbers));
    /// assert!(flags.contains(DecomposeFlag::SplitPathElements));
    /// ```
    DecomposeFlags,
    /// A single decomposition option.
    DecomposeFlag {
        /// Split the query into key/value pairs
        SplitQueryElements = "split_query_elements",
        /// Split the path into percent-decoded segments
        SplitPathElements = "split_path_elements",
        /// Fill an absent or empty port from the scheme's default port
        UseWellKnownPortNumbers = "use_well_known_port_numbers",
        /// Lowercase the scheme and registered-name hosts
        LowercaseWhenAppropriate = "lowercase_when_appropriate",
        /// Replace the path segments with their `.`/`..`-resolved form
        NormalizePath = "normalize_path",
        /// Attach the registered scheme policy to the result
        QueryKnownScheme = "query_known_scheme",
        /// Run the registered scheme policy's validators on the result
        ValidateKnownScheme = "validate_known_scheme",
    }
}

flag_set! {
    /// Options for [`compose_uri`](crate::compose_uri).
    ComposeFlags,
    /// A single composition option.
    ComposeFlag {
        /// Keep a leading `/` on a path that had one
        PathLeadingSlash = "path_leading_slash",
        /// Keep a trailing `/` on a path that had one
        PathTrailingSlash = "path_trailing_slash",
        /// Lowercase the scheme and registered-name hosts
        LowercaseWhenAppropriate = "lowercase_when_appropriate",
        /// Resolve `.` and `..` segments
        NormalizePath = "normalize_path",
        /// Apply the registered scheme policy's normalization hooks
        UseKnownScheme = "use_known_scheme",
    }
}
