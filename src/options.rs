//! Options controlling how strictly packing and unpacking treat edge cases.
//!
//! The defaults reject everything questionable; each policy can be relaxed
//! individually.
//!
//! # Beispiel
//!
//! ```
//! use binpack::options::{ExtraArguments, PackOptions, UnterminatedStrings};
//!
//! let opts = PackOptions::default()
//!     .with_extra_arguments(ExtraArguments::Ignore)
//!     .with_unterminated_strings(UnterminatedStrings::Accept);
//!
//! assert_eq!(opts.extra_arguments(), ExtraArguments::Ignore);
//! assert_eq!(opts.unterminated_strings(), UnterminatedStrings::Accept);
//! ```

/// What to do with values left over after the last operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraArguments {
    /// Fail with [`Error::ExtraArguments`](crate::Error::ExtraArguments).
    #[default]
    Reject,
    /// Drop them (logged at `warn` level).
    Ignore,
}

/// What to do when a `z` string reaches the end of the input without a
/// zero terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnterminatedStrings {
    /// Fail with [`Error::UnterminatedString`](crate::Error::UnterminatedString).
    #[default]
    Reject,
    /// Return the bytes read so far.
    Accept,
}

/// How decoded string bytes that are not valid UTF-8 are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Policy {
    /// Fail with [`Error::InvalidUtf8`](crate::Error::InvalidUtf8).
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD.
    Lossy,
}

/// Options shared by pack, unpack and size computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackOptions {
    extra_arguments: ExtraArguments,
    unterminated_strings: UnterminatedStrings,
    invalid_utf8: Utf8Policy,
}

impl PackOptions {
    /// Options accepting whatever can be accepted: extra arguments are
    /// ignored, unterminated strings returned, invalid UTF-8 replaced.
    pub fn lenient() -> Self {
        Self {
            extra_arguments: ExtraArguments::Ignore,
            unterminated_strings: UnterminatedStrings::Accept,
            invalid_utf8: Utf8Policy::Lossy,
        }
    }

    pub fn extra_arguments(&self) -> ExtraArguments { self.extra_arguments }

    pub fn unterminated_strings(&self) -> UnterminatedStrings { self.unterminated_strings }

    pub fn invalid_utf8(&self) -> Utf8Policy { self.invalid_utf8 }

    pub fn with_extra_arguments(mut self, policy: ExtraArguments) -> Self { self.extra_arguments = policy; self }

    pub fn with_unterminated_strings(mut self, policy: UnterminatedStrings) -> Self { self.unterminated_strings = policy; self }

    pub fn with_invalid_utf8(mut self, policy: Utf8Policy) -> Self { self.invalid_utf8 = policy; self }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        let opts = PackOptions::default();
        assert_eq!(opts.extra_arguments(), ExtraArguments::Reject);
        assert_eq!(opts.unterminated_strings(), UnterminatedStrings::Reject);
        assert_eq!(opts.invalid_utf8(), Utf8Policy::Strict);
    }

    #[test]
    fn lenient_relaxes_everything() {
        let opts = PackOptions::lenient();
        assert_eq!(opts.extra_arguments(), ExtraArguments::Ignore);
        assert_eq!(opts.unterminated_strings(), UnterminatedStrings::Accept);
        assert_eq!(opts.invalid_utf8(), Utf8Policy::Lossy);
    }

    #[test]
    fn builders_touch_one_field() {
        let opts = PackOptions::default().with_invalid_utf8(Utf8Policy::Lossy);
        assert_eq!(opts.invalid_utf8(), Utf8Policy::Lossy);
        assert_eq!(opts.extra_arguments(), ExtraArguments::Reject);
    }
}
