use crate::error::ExtractError;

/// Literal that separates the guidelines region from the FAQ region.
pub const FAQ_DIVIDER: &str = "Frequently Asked Questions:  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions<'a> {
    /// Everything before the divider.
    pub guidelines: &'a str,
    /// Everything after the divider, divider excluded.
    pub faq: &'a str,
}

/// Split the merged document at the FAQ divider, which must occur exactly once.
pub fn split_regions(merged: &str) -> Result<Regions<'_>, ExtractError> {
    let count = merged.matches(FAQ_DIVIDER).count();
    if count > 1 {
        return Err(ExtractError::DuplicateDivider {
            divider: FAQ_DIVIDER,
            count,
        });
    }

    let at = merged.find(FAQ_DIVIDER).ok_or(ExtractError::MissingDivider {
        divider: FAQ_DIVIDER,
    })?;

    Ok(Regions {
        guidelines: &merged[..at],
        faq: &merged[at + FAQ_DIVIDER.len()..],
    })
}
