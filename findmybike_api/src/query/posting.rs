use crate::types::{BikeType, Color, Frame};

use super::{common::Pagination, Query};

/// Filter for the `/posting` endpoint. Unset aspects are not filtered on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostingQuery {
    pub pagination: Pagination,
    pub bike: Option<BikeType>,
    pub frame: Option<Frame>,
    pub color: Option<Color>,
}

impl Query for PostingQuery {
    fn get_pagination(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(bike) = self.bike {
            pairs.push(("bike", bike.to_string()));
        }
        if let Some(frame) = self.frame {
            pairs.push(("frame", frame.to_string()));
        }
        if let Some(color) = self.color {
            pairs.push(("color", color.to_string()));
        }
        pairs.extend(self.pagination.query_pairs());
        pairs
    }
}

impl PostingQuery {
    pub fn with_bike(mut self, bike: BikeType) -> Self {
        self.bike = Some(bike);
        self
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns the same filter with pagination cleared.
    pub fn without_pagination(&self) -> Self {
        let mut query = self.clone();
        query.pagination.reset();
        query
    }

    /// True when no aspect is filtered on.
    pub fn is_unfiltered(&self) -> bool {
        self.bike.is_none() && self.frame.is_none() && self.color.is_none()
    }
}
