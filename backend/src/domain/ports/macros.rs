//! `define_port_error!` builds the error enums returned by repository ports.
//!
//! Every variant carries named fields. The macro derives `thiserror::Error`
//! and adds one snake_case constructor per variant whose parameters accept
//! anything convertible into the field type, so adapters can write
//! `ComplaintRepositoryError::query(err.to_string())` or pass a `&str`.

macro_rules! define_port_error {
    (@ctor $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            /// Construct this variant from convertible field values.
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };
    (@ctor $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty $(, $($rest:tt)*)?) => {
        define_port_error!(
            @ctor $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($($rest)*)?
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $(#[doc = concat!("`", stringify!($field), "` detail for this error.")] $field : $ty),+ },
            )+
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant [] [] $($field : $ty),+);
            )+
        }
    };
}

pub(crate) use define_port_error;
