pub mod analysis;
pub mod error;
pub mod report;
pub mod rules;
pub mod transducer;

pub use analysis::AnalysisResult;
pub use error::{EwondoErrorExt, Level};
pub use rules::RuleTable;
pub use transducer::{NO_CHANGES, Transducer};

pub fn generate_error_report<E: EwondoErrorExt>(error: &E) -> String {
    format!(
        "EWONDO | {} | {} | {}",
        error.level(),
        error.issuer(),
        error.message()
    )
}
