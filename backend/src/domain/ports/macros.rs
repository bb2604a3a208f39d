//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
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
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum UplinkPortError {
            Offline => "uplink offline",
            Refused { message: String } => "uplink refused: {message}",
            Retries { attempts: u32 } => "uplink gave up after {attempts} attempts",
            Mixed { host: String, attempts: u32 } => "uplink {host} failed {attempts} times",
        }
    }

    #[rstest]
    #[case(UplinkPortError::offline(), "uplink offline")]
    #[case(UplinkPortError::refused("tls"), "uplink refused: tls")]
    #[case(UplinkPortError::retries(3_u32), "uplink gave up after 3 attempts")]
    #[case(UplinkPortError::mixed("db", 2_u32), "uplink db failed 2 times")]
    fn generated_constructors_render(#[case] error: UplinkPortError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn string_fields_accept_owned_and_borrowed() {
        assert_eq!(
            UplinkPortError::refused(String::from("x")),
            UplinkPortError::refused("x")
        );
    }
}
