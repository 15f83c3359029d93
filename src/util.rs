/// Text scanning helpers.
///
/// Statement text is scanned rather than tokenized, so bracket matching and
/// nesting-aware splitting are shared by the loader, the range parser and the
/// element generators.
pub mod text;
