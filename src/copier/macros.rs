//! `impl_deep_copy!`: opt-in field visitor generation.

/// Implement [`DeepCopy`](crate::DeepCopy) for a struct or enum by listing
/// its fields.
///
/// Invoke the macro in the module that defines the type: the generated impl
/// reads and writes private fields the same way the type's own methods do.
/// Named-field structs are rebuilt with a struct literal, so leaving a field
/// out is a compile error rather than a silently skipped field.
///
/// Fields are visited in the order listed; list them in declaration order.
/// Type parameters are supported and get a `DeepCopy` bound; lifetimes are
/// not.
///
/// # Forms
///
/// ```
/// use struct_sanitizer::impl_deep_copy;
///
/// struct Named { title: String, count: u32 }
/// impl_deep_copy!(Named { title, count });
///
/// struct Tuple(String, u32);
/// impl_deep_copy!(Tuple(0, 1));
///
/// struct Unit;
/// impl_deep_copy!(Unit);
///
/// struct Wrapper<T> { inner: T }
/// impl_deep_copy!(Wrapper<T> { inner });
/// ```
///
/// Enums name their variants and bind variant fields to identifiers:
///
/// ```
/// use struct_sanitizer::impl_deep_copy;
///
/// enum Event {
///     Ping,
///     Message(String),
///     Edit { before: String, after: String },
/// }
///
/// impl_deep_copy!(enum Event {
///     Ping,
///     Message(body),
///     Edit { before, after },
/// });
/// ```
#[macro_export]
macro_rules! impl_deep_copy {
    (enum $name:ident $(< $($gen:ident),+ $(,)? >)? {
        $(
            $variant:ident
            $( ( $($tfield:ident),* $(,)? ) )?
            $( { $($sfield:ident),* $(,)? } )?
        ),* $(,)?
    }) => {
        impl $(< $($gen: $crate::DeepCopy),+ >)? $crate::DeepCopy for $name $(< $($gen),+ >)? {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Aggregate
            }

            #[allow(unused_variables)]
            fn deep_copy(
                &self,
                cx: &mut $crate::CopyContext<'_>,
            ) -> ::core::result::Result<Self, $crate::CopyError> {
                ::core::result::Result::Ok(match self {
                    $(
                        Self::$variant
                        $( ( $($tfield),* ) )?
                        $( { $($sfield),* } )?
                        => Self::$variant
                        $( (
                            $(cx.field(
                                ::core::concat!(
                                    ::core::stringify!($variant), ".", ::core::stringify!($tfield)
                                ),
                                $tfield,
                            )?),*
                        ) )?
                        $( {
                            $($sfield: cx.field(
                                ::core::concat!(
                                    ::core::stringify!($variant), ".", ::core::stringify!($sfield)
                                ),
                                $sfield,
                            )?),*
                        } )?,
                    )*
                })
            }
        }
    };

    ($name:ident $(< $($gen:ident),+ $(,)? >)? { $($field:ident),* $(,)? }) => {
        impl $(< $($gen: $crate::DeepCopy),+ >)? $crate::DeepCopy for $name $(< $($gen),+ >)? {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Aggregate
            }

            #[allow(unused_variables)]
            fn deep_copy(
                &self,
                cx: &mut $crate::CopyContext<'_>,
            ) -> ::core::result::Result<Self, $crate::CopyError> {
                ::core::result::Result::Ok(Self {
                    $($field: cx.field(::core::stringify!($field), &self.$field)?,)*
                })
            }
        }
    };

    ($name:ident $(< $($gen:ident),+ $(,)? >)? ( $($idx:tt),* $(,)? )) => {
        impl $(< $($gen: $crate::DeepCopy),+ >)? $crate::DeepCopy for $name $(< $($gen),+ >)? {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Aggregate
            }

            #[allow(unused_variables)]
            fn deep_copy(
                &self,
                cx: &mut $crate::CopyContext<'_>,
            ) -> ::core::result::Result<Self, $crate::CopyError> {
                ::core::result::Result::Ok(Self(
                    $(cx.field(::core::stringify!($idx), &self.$idx)?,)*
                ))
            }
        }
    };

    ($name:ident $(< $($gen:ident),+ $(,)? >)?) => {
        impl $(< $($gen: $crate::DeepCopy),+ >)? $crate::DeepCopy for $name $(< $($gen),+ >)? {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Aggregate
            }

            fn deep_copy(
                &self,
                _cx: &mut $crate::CopyContext<'_>,
            ) -> ::core::result::Result<Self, $crate::CopyError> {
                ::core::result::Result::Ok(Self)
            }
        }
    };
}
