use thiserror::Error;

pub type RcResult<T> = Result<T, RcError>;

#[derive(Error, Debug)]
pub enum RcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Out of range: {what} = {value} (expected {expected})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        expected: &'static str,
    },
}
