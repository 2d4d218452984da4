mod meta;
pub use self::meta::Response;

mod aspect;
pub use self::aspect::{Aspect, BikeType, Color, Frame, Prediction};

mod posting;
pub use self::posting::{Posting, PostingId};

mod correction;
pub use self::correction::Correction;

/// Response body of `GET /posting`.
pub type PostingList = Response<Vec<Posting>>;
