//! Macros for reducing boilerplate when declaring entity sort keys

/// Declare a closed sort-key enum and implement [`SortKey`](crate::core::sort::SortKey) for it
///
/// Each variant maps to one field (wire name), one direction (`Asc` or
/// `Desc`) and a dropdown label. Variants keep their declaration order in
/// `SortKey::all()`.
///
/// # Example
///
/// ```rust,ignore
/// sort_keys! {
///     pub enum UserSort {
///         NameAsc => ("name", Asc, "Name (A-Z)"),
///         NameDesc => ("name", Desc, "Name (Z-A)"),
///     }
/// }
///
/// assert_eq!(UserSort::NameDesc.key(), "name-desc");
/// ```
#[macro_export]
macro_rules! sort_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => ($field:literal, $dir:ident, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant ),+
        }

        impl $crate::core::sort::SortKey for $name {
            fn all() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn field(self) -> &'static str {
                match self {
                    $( $name::$variant => $field ),+
                }
            }

            fn direction(self) -> $crate::core::sort::Direction {
                match self {
                    $( $name::$variant => $crate::core::sort::Direction::$dir ),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::core::sort::SortKey::key(*self))
            }
        }
    };
}
