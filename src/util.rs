//! Miscellaneous stuff (especially macros) which are used across the project and needed a home

/// Generate chainable builder-style setters which each overwrite one field.
macro_rules! setters {
    ( $(
        $name:ident $( ( $($pname:ident: $ptype:ty),* $(,)? ) )?  => $field:ident = $value:expr
    ),* $(,)? ) => {
        $(
            pub fn $name(mut self $( , $( $pname: $ptype ),* )?) -> Self {
                self.$field = $value;
                self
            }
        )*
    };
}

/// Implement `Debug` but skip fields that are boring, huge, or still default.
macro_rules! abbrev_debug {
    (
        $class:ident $( < $( $lt:lifetime ),* > )?;
        $( write $always:ident, )*
        $( ignore $ignore:ident, )*
        $( if $sometimes:ident != $default:expr, )*
    ) => {
        impl $( < $( $lt ),* > )?  fmt::Debug for $class $( < $( $lt ),* > )? {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($class), " {{ "))?;
                $(
                    write!(f, concat!(stringify!($always), ": {:?}, "), self.$always)?;
                )*
                $(
                    write!(f, concat!(stringify!($ignore), ": .., "))?;
                )*
                $(
                    if self.$sometimes != $default {
                        write!(f, concat!(stringify!($sometimes), ": {:?}, "), self.$sometimes)?;
                    }
                )*
                write!(f, ".. }}")
            }
        }
    }
}

/// Short syntax for feature-gated function calls
macro_rules! feature_switch {
    ( $( $feature:literal => $call:expr ),* $(,)? ) => { loop {
        $(
            #[cfg(feature = $feature)]
            {
                break $call;
            }
        )*
        #[allow(unreachable_code)]
        {
            unreachable!("feature_switch! but no features enabled!");
        }
    } }
}

pub(crate) use {abbrev_debug, feature_switch, setters};
