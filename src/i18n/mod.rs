// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Errors and notifications carry Fluent message keys; this module turns
//! them into text. Translation files are embedded from `assets/i18n/`.
//!
//! The locale is resolved from, in order: the `--lang` flag, the `language`
//! entry of `settings.toml`, the OS locale, then `en-US`.

pub mod fluent;

pub use fluent::I18n;
