//! A (bike, frame, color) selection edited field by field from raw select
//! values. Used both as the search filter and as a correction draft.

use findmybike_api::types::{Aspect, BikeType, Color, Frame, Prediction};
use findmybike_api::PostingQuery;

use crate::error::FindMyBikeError;
use crate::validation::{validate_bike, validate_color, validate_frame};

/// Three optional aspects. An empty select value clears the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AspectSelection {
    pub bike: Option<BikeType>,
    pub frame: Option<Frame>,
    pub color: Option<Color>,
}

/// Filter selection owned by the search form.
pub type QueryState = AspectSelection;

/// Replacement prediction being edited for one posting.
pub type CorrectionDraft = AspectSelection;

impl AspectSelection {
    /// Updates one field from a raw select value. Blank input clears the
    /// field; anything else must name a known value. Never triggers a fetch.
    pub fn set_field(&mut self, aspect: Aspect, raw: &str) -> Result<(), FindMyBikeError> {
        let blank = raw.trim().is_empty();
        match aspect {
            Aspect::Bike => self.bike = (!blank).then(|| validate_bike(raw)).transpose()?,
            Aspect::Frame => self.frame = (!blank).then(|| validate_frame(raw)).transpose()?,
            Aspect::Color => self.color = (!blank).then(|| validate_color(raw)).transpose()?,
        }
        Ok(())
    }

    /// Wire value currently selected for `aspect`, or `""` when unset.
    pub fn field(&self, aspect: Aspect) -> &'static str {
        match aspect {
            Aspect::Bike => self.bike.map(|v| v.as_str()),
            Aspect::Frame => self.frame.map(|v| v.as_str()),
            Aspect::Color => self.color.map(|v| v.as_str()),
        }
        .unwrap_or("")
    }

    /// True once all three aspects are set.
    pub fn is_complete(&self) -> bool {
        self.bike.is_some() && self.frame.is_some() && self.color.is_some()
    }

    /// The complete prediction, if every aspect is set.
    pub fn to_prediction(&self) -> Option<Prediction> {
        Some(Prediction {
            bike: self.bike?,
            frame: self.frame?,
            color: self.color?,
        })
    }

    /// Filter query for the selected aspects, without pagination.
    pub fn to_query(&self) -> PostingQuery {
        PostingQuery {
            bike: self.bike,
            frame: self.frame,
            color: self.color,
            ..PostingQuery::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use findmybike_api::Query;

    use super::*;

    #[test]
    fn empty_fields_are_omitted_from_query() {
        let mut query = QueryState::default();
        query.set_field(Aspect::Bike, "").unwrap();
        query.set_field(Aspect::Frame, "trapeze").unwrap();
        query.set_field(Aspect::Color, "").unwrap();
        assert_eq!(query.to_query().to_query_string(), "frame=trapeze");
    }

    #[test]
    fn clearing_a_field_removes_the_filter() {
        let mut query = QueryState::default();
        query.set_field(Aspect::Color, "red").unwrap();
        query.set_field(Aspect::Color, "  ").unwrap();
        assert_eq!(query.color, None);
        assert_eq!(query.field(Aspect::Color), "");
    }

    #[test]
    fn invalid_value_leaves_field_untouched() {
        let mut query = QueryState::default();
        query.set_field(Aspect::Frame, "diamond").unwrap();
        assert!(query.set_field(Aspect::Frame, "hexagon").is_err());
        assert_eq!(query.frame, Some(Frame::Diamond));
    }

    #[test]
    fn prediction_requires_all_fields() {
        let mut draft = CorrectionDraft::default();
        draft.set_field(Aspect::Bike, "cargo").unwrap();
        draft.set_field(Aspect::Frame, "x").unwrap();
        assert!(!draft.is_complete());
        assert_eq!(draft.to_prediction(), None);

        draft.set_field(Aspect::Color, "blue").unwrap();
        assert!(draft.is_complete());
        assert_eq!(
            draft.to_prediction(),
            Some(Prediction {
                bike: BikeType::Cargo,
                frame: Frame::X,
                color: Color::Blue,
            })
        );
    }
}
