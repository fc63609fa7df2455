//! ML lab: a model trained on the office decisions screens a scrolling line

mod model;
mod people_line;

use crate::office::OfficeError;

pub use model::{Predictor, WeightedModel, COLOR_BIAS_SCALE};
pub use people_line::{
    MlPerson, PeopleLine, ScrollTween, LINE_START_UV, LINE_WIDTH_UV, PERSON_X_OFFSET,
    SCROLL_DELAY_MS, SCROLL_TIME_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MlError {
    #[error("the people line is empty")]
    EmptyLine,
    #[error(transparent)]
    Records(#[from] OfficeError),
}
