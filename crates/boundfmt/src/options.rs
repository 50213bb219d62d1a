/// Text written in place of a floating-point conversion under
/// [`FloatMode::Placeholder`].
pub const FLOAT_PLACEHOLDER: &str = "<float>";

/// Configuration options for the printf-subset converter.
///
/// # Default
///
/// Floating-point conversions render [`FLOAT_PLACEHOLDER`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConverterOptions {
    /// How the `a A e E f F g G` conversions are rendered.
    ///
    /// The argument is consumed in either mode, so later conversions still
    /// line up with their arguments.
    ///
    /// # Default
    ///
    /// [`FloatMode::Placeholder`]
    pub float_mode: FloatMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloatMode {
    /// Write [`FLOAT_PLACEHOLDER`] instead of the value. Log consumers that
    /// grep for the placeholder keep working.
    #[default]
    Placeholder,
    /// Render the value: `f`/`F` as fixed-point text with the requested
    /// precision (6 when unspecified), `e`/`E` in Rust's exponent notation
    /// with that precision, and `g G a A` as the shortest text that reads
    /// back to the same value.
    Fixed,
}
