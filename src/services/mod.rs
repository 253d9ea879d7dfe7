//! Service layer for business logic.
//!
//! Services hold the computations that sit between the store and the HTTP
//! handlers. The only one today is the daylight-window extractor.

pub mod daylight;

pub use daylight::{
    extract_daylight_windows, DaylightError, DaylightWindow, VISIBILITY_DAYLIGHT,
    VISIBILITY_ECLIPSED,
};
