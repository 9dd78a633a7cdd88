// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared by the domain types.

/// `Display` for a fieldless enum, one string per variant.
///
/// Used for `Status` so logs and breakdown text print the same
/// snake_case names it serializes to.
///
/// ```ignore
/// crate::simple_display! {
///     Status {
///         Ok => "ok",
///         Broken => "broken",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident => $text:literal ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let text = match self {
                    $( Self::$variant => $text, )+
                };
                f.write_str(text)
            }
        }
    };
}

/// Test-only builder for a record with public fields.
///
/// The builder wraps a fully populated `$target` seeded with the listed
/// defaults; each setter overwrites one field and `build()` hands the record
/// back. Everything generated is gated behind
/// `#[cfg(any(test, feature = "test-support"))]`.
///
/// - `into`: setter accepts `impl Into<Type>` (ids, names)
/// - `set`: setter takes `Type` as is (flags, histories)
/// - `option`: field is `Option<Type>`; setter fills it with `Some`
///
/// ```ignore
/// crate::builder! {
///     pub struct JobSnapshotBuilder => JobSnapshot {
///         into { url: JobUrl = "http://ci/job/test/" }
///         set { building: bool = false }
///         option { upstream: JobUrl = None }
///     }
/// }
/// ```
#[macro_export]
macro_rules! builder {
    (
        pub struct $builder:ident => $target:ident {
            $(into {
                $( $into_field:ident : $into_ty:ty = $into_default:expr ),* $(,)?
            })?
            $(set {
                $( $set_field:ident : $set_ty:ty = $set_default:expr ),* $(,)?
            })?
            $(option {
                $( $opt_field:ident : $opt_ty:ty = $opt_default:expr ),* $(,)?
            })?
        }
    ) => {
        #[cfg(any(test, feature = "test-support"))]
        pub struct $builder($target);

        #[cfg(any(test, feature = "test-support"))]
        impl Default for $builder {
            fn default() -> Self {
                Self($target {
                    $($( $into_field: <$into_ty>::from($into_default), )*)?
                    $($( $set_field: $set_default, )*)?
                    $($( $opt_field: $opt_default, )*)?
                })
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $builder {
            $($(
                pub fn $into_field(mut self, value: impl Into<$into_ty>) -> Self {
                    self.0.$into_field = value.into();
                    self
                }
            )*)?
            $($(
                pub fn $set_field(mut self, value: $set_ty) -> Self {
                    self.0.$set_field = value;
                    self
                }
            )*)?
            $($(
                pub fn $opt_field(mut self, value: impl Into<$opt_ty>) -> Self {
                    self.0.$opt_field = Some(value.into());
                    self
                }
            )*)?

            pub fn build(self) -> $target {
                self.0
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $target {
            /// Builder seeded with test defaults.
            pub fn builder() -> $builder {
                $builder::default()
            }
        }
    };
}
