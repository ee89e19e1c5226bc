pub mod convert;
pub mod currencies;
pub mod historical;
pub mod rates;
pub mod status;
pub mod ui;
