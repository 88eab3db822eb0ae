//! Cell redaction policies and the fixed markers written into anonymized
//! tables.
//!
//! Policies are pure cell transformations. They do not choose columns or look
//! at other cells of the row.

use std::borrow::Cow;

use crate::dataset::Value;

/// Placeholder written into every cell of a redacted column.
pub const REDACTED_MARKER: &str = "REDACTED";

/// Placeholder written into the quasi-identifier cells of suppressed rows.
pub const SUPPRESSED_MARKER: &str = "SUPPRESSED";

/// Keeps selected segments of a cell's text visible and masks the remainder.
///
/// Operates on Unicode scalar values. If the visible spans cover the whole
/// text, the text is kept as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeepConfig {
    visible_prefix: usize,
    visible_suffix: usize,
    mask_char: char,
}

impl KeepConfig {
    /// Keeps only the first `visible_prefix` scalar values.
    #[must_use]
    pub fn first(visible_prefix: usize) -> Self {
        Self::both(visible_prefix, 0)
    }

    /// Keeps only the last `visible_suffix` scalar values.
    #[must_use]
    pub fn last(visible_suffix: usize) -> Self {
        Self::both(0, visible_suffix)
    }

    /// Keeps both a leading and a trailing span visible.
    #[must_use]
    pub fn both(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            visible_prefix,
            visible_suffix,
            mask_char: '*',
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    fn apply_to(&self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        if self.visible_prefix.saturating_add(self.visible_suffix) >= total {
            return text.to_owned();
        }
        chars[self.visible_prefix..total - self.visible_suffix].fill(self.mask_char);
        chars.into_iter().collect()
    }
}

/// Masks selected segments of a cell's text and leaves the remainder.
///
/// If the masked spans cover the whole text, every scalar value is masked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::struct_field_names)]
pub struct MaskConfig {
    mask_prefix: usize,
    mask_suffix: usize,
    mask_char: char,
}

impl MaskConfig {
    /// Masks only the first `mask_prefix` scalar values.
    #[must_use]
    pub fn first(mask_prefix: usize) -> Self {
        Self::both(mask_prefix, 0)
    }

    /// Masks only the last `mask_suffix` scalar values.
    #[must_use]
    pub fn last(mask_suffix: usize) -> Self {
        Self::both(0, mask_suffix)
    }

    /// Masks both a leading and a trailing span.
    #[must_use]
    pub fn both(mask_prefix: usize, mask_suffix: usize) -> Self {
        Self {
            mask_prefix,
            mask_suffix,
            mask_char: '*',
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    fn apply_to(&self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        if self.mask_prefix.saturating_add(self.mask_suffix) >= total {
            chars.fill(self.mask_char);
            return chars.into_iter().collect();
        }
        chars[..self.mask_prefix].fill(self.mask_char);
        chars[total - self.mask_suffix..].fill(self.mask_char);
        chars.into_iter().collect()
    }
}

/// How the cells of a redacted column are rewritten.
///
/// Every policy yields a [`Value::Text`] cell and is idempotent. Missing cells
/// always receive [`REDACTED_MARKER`], whatever the policy: a partial policy has
/// nothing to keep visible. Partial policies leave a cell that already holds
/// [`REDACTED_MARKER`] as it is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellRedactionPolicy {
    /// Replace the whole cell with a fixed placeholder.
    Full {
        /// The placeholder text.
        placeholder: Cow<'static, str>,
    },
    /// Keep configured segments of the cell's text visible.
    Keep(KeepConfig),
    /// Mask configured segments of the cell's text.
    Mask(MaskConfig),
}

impl CellRedactionPolicy {
    /// Full replacement with [`REDACTED_MARKER`].
    #[must_use]
    pub fn default_full() -> Self {
        Self::Full {
            placeholder: Cow::Borrowed(REDACTED_MARKER),
        }
    }

    /// Full replacement with a custom placeholder.
    #[must_use]
    pub fn full_with<P>(placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::Full {
            placeholder: placeholder.into(),
        }
    }

    /// Keeps the first `visible_prefix` scalar values of each cell.
    #[must_use]
    pub fn keep_first(visible_prefix: usize) -> Self {
        Self::Keep(KeepConfig::first(visible_prefix))
    }

    /// Keeps the last `visible_suffix` scalar values of each cell.
    #[must_use]
    pub fn keep_last(visible_suffix: usize) -> Self {
        Self::Keep(KeepConfig::last(visible_suffix))
    }

    /// Masks the first `mask_prefix` scalar values of each cell.
    #[must_use]
    pub fn mask_first(mask_prefix: usize) -> Self {
        Self::Mask(MaskConfig::first(mask_prefix))
    }

    /// Masks the last `mask_suffix` scalar values of each cell.
    #[must_use]
    pub fn mask_last(mask_suffix: usize) -> Self {
        Self::Mask(MaskConfig::last(mask_suffix))
    }

    /// Returns the redacted form of `value`.
    #[must_use]
    pub fn apply_to(&self, value: &Value) -> Value {
        match (self, value) {
            (Self::Full { placeholder }, _) => Value::text(placeholder.clone().into_owned()),
            (_, Value::Missing) => Value::text(REDACTED_MARKER),
            (_, Value::Text(text)) if text == REDACTED_MARKER => value.clone(),
            (Self::Keep(config), value) => Value::Text(config.apply_to(&value.to_string())),
            (Self::Mask(config), value) => Value::Text(config.apply_to(&value.to_string())),
        }
    }
}

impl Default for CellRedactionPolicy {
    fn default() -> Self {
        Self::default_full()
    }
}
