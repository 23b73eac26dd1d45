use serde::{Deserialize, Serialize};

use crate::level::ObjectId;

/// One surveillance link: the camera source and its death-watch target.
///
/// [`ObjectId::NONE`] in either slot means the link is unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveillanceObject {
    pub source: ObjectId,
    pub deathwatch: ObjectId,
}

impl SurveillanceObject {
    pub const fn new(source: ObjectId, deathwatch: ObjectId) -> Self {
        Self { source, deathwatch }
    }

    pub const fn is_unset(self) -> bool {
        self.source.is_none() && self.deathwatch.is_none()
    }
}
