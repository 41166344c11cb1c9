//! `define_port_error!`: declare a port's error enum together with the domain
//! [`ErrorCode`](crate::domain::ErrorCode) each variant surfaces as.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum LabelRepositoryError {
//!         Connection { message: String } as ServiceUnavailable
//!             => "label repository connection failed: {message}",
//!         DuplicateName { name: String } as Conflict => "name already in use: {name}",
//!     }
//! }
//! let err = LabelRepositoryError::duplicate_name("Thai");
//! assert_eq!(err.error_code(), ErrorCode::Conflict);
//! let public: Error = err.into();
//! ```
//!
//! Every variant gets a snake_case constructor taking `impl Into<_>` for each
//! field, and the enum converts into [`Error`](crate::domain::Error) with the
//! `#[error]` text as its message.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident),* }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    as $code:ident => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Category the failure takes once it leaves the port.
            pub fn error_code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field),* } )?) => {
                            $crate::domain::ErrorCode::$code
                        }
                    )*
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(err: $name) -> Self {
                $crate::domain::Error::new(err.error_code(), err.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::{Error, ErrorCode};
    use rstest::rstest;

    define_port_error! {
        pub enum StoreError {
            Offline { message: String } as ServiceUnavailable => "store offline: {message}",
            Missing { id: i64 } as NotFound => "row {id} missing",
            Clash { name: String, owner: i64 } as Conflict => "{name} taken by {owner}",
            Corrupt as InternalError => "store corrupt",
        }
    }

    #[rstest]
    #[case(StoreError::offline("pool closed"), ErrorCode::ServiceUnavailable, "store offline: pool closed")]
    #[case(StoreError::missing(42_i64), ErrorCode::NotFound, "row 42 missing")]
    #[case(StoreError::clash("Thai", 7_i64), ErrorCode::Conflict, "Thai taken by 7")]
    #[case(StoreError::corrupt(), ErrorCode::InternalError, "store corrupt")]
    fn variants_carry_code_and_message(
        #[case] err: StoreError,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        assert_eq!(err.error_code(), code);
        let public = Error::from(err);
        assert_eq!(public.code(), code);
        assert_eq!(public.message(), message);
    }
}
