//! Fixed-shape overlays generated at compile time.
//!
//! [`declare_overlay!`](crate::declare_overlay) turns a member list into a
//! struct with one public field per member. Members are ordinary fields, so
//! they are checked by the compiler and show up in documentation and IDE
//! completion. The price is that the member set is part of the type: a
//! different descriptor set needs a different declaration.

/// Declare an overlay struct with one driver field per member.
///
/// Every field is resolved through the registry by `build`, after the
/// declared descriptors pass the same validation as a loaded descriptor
/// set. The generated
/// type implements [`IpContainer`](crate::IpContainer), and naming a
/// member `name` or `ip_dict` is rejected by the compiler as a duplicate
/// field.
///
/// ```rust
/// use overlay_hal::{declare_overlay, DriverRegistry, GpioDriver};
///
/// declare_overlay! {
///     /// Base overlay of the demo board.
///     pub struct BaseOverlay {
///         gpio_btns => "axi_gpio:2.0",
///         my_custom_ip => "hls:my_ip:1.0",
///     }
/// }
///
/// let overlay = BaseOverlay::build("base", &DriverRegistry::with_builtin_drivers())?;
/// assert!(overlay.gpio_btns.is::<GpioDriver>());
/// assert_eq!(BaseOverlay::MEMBERS, &["gpio_btns", "my_custom_ip"]);
/// # Ok::<(), overlay_hal::overlay_common::ip::driver::OverlayError>(())
/// ```
#[macro_export]
macro_rules! declare_overlay {
    (
        $(#[$meta:meta])*
        $vis:vis struct $overlay:ident {
            $($member:ident => $device_type:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $overlay {
            name: ::std::string::String,
            ip_dict: $crate::overlay_common::ip::descriptor::IpDict,
            $(
                #[doc = concat!("Driver for `", $device_type, "`.")]
                pub $member: ::std::sync::Arc<dyn $crate::overlay_common::ip::driver::IpDriver>,
            )*
        }

        impl $overlay {
            /// Member names in declaration order.
            pub const MEMBERS: &'static [&'static str] = &[$(stringify!($member)),*];

            /// Descriptor set this overlay is declared with.
            pub fn descriptors() -> $crate::overlay_common::ip::descriptor::IpDict {
                #[allow(unused_mut)]
                let mut ip_dict = $crate::overlay_common::ip::descriptor::IpDict::new();
                $(ip_dict.insert(stringify!($member), $device_type);)*
                ip_dict
            }

            /// Construct every member through `registry`.
            ///
            /// # Errors
            /// Returns `OverlayError::InvalidDescriptor` if a member is
            /// declared with a blank device type.
            #[allow(unused_variables)]
            pub fn build(
                name: impl ::std::convert::Into<::std::string::String>,
                registry: &$crate::DriverRegistry,
            ) -> ::std::result::Result<Self, $crate::overlay_common::ip::driver::OverlayError> {
                let ip_dict = Self::descriptors();
                ip_dict.validate()?;
                ::std::result::Result::Ok(Self {
                    name: name.into(),
                    ip_dict,
                    $(
                        $member: ::std::sync::Arc::from(registry.create_driver(
                            &$crate::overlay_common::ip::descriptor::DeviceDescriptor::new(
                                stringify!($member),
                                $device_type,
                            ),
                        )),
                    )*
                })
            }
        }

        impl $crate::IpContainer for $overlay {
            fn name(&self) -> &str {
                &self.name
            }

            fn ip_dict(&self) -> &$crate::overlay_common::ip::descriptor::IpDict {
                &self.ip_dict
            }

            fn get(
                &self,
                name: &str,
            ) -> ::std::result::Result<
                &::std::sync::Arc<dyn $crate::overlay_common::ip::driver::IpDriver>,
                $crate::overlay_common::ip::driver::OverlayError,
            > {
                match name {
                    $(stringify!($member) => ::std::result::Result::Ok(&self.$member),)*
                    _ => ::std::result::Result::Err(
                        $crate::overlay_common::ip::driver::OverlayError::MemberNotFound(
                            name.to_string(),
                        ),
                    ),
                }
            }

            fn peek(
                &self,
                name: &str,
            ) -> ::std::option::Option<&::std::sync::Arc<dyn $crate::overlay_common::ip::driver::IpDriver>> {
                $crate::IpContainer::get(self, name).ok()
            }
        }
    };
}
