//! Front-desk domain engine: guest records, check-ins and the expense
//! recompute pass that keeps every guest's running total in sync with the
//! stored stays.

pub use checkins::Checkin;
pub use error::EngineError;
pub use guests::Guest;
pub use ops::{Engine, EngineBuilder};
pub use rates::{RateTable, STANDARD_RATES, stay_charge_minor};

mod checkins;
mod error;
mod guests;
mod ops;
mod rates;

type ResultEngine<T> = Result<T, EngineError>;
