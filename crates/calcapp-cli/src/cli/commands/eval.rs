use calcapp_core::{IgnoreReason, SubmissionController, SubmitOutcome, ValidationError};

use crate::exit_codes::{FAILED, SUCCESS};

pub async fn run(session: &SubmissionController, expression: &str) -> i32 {
    session.set_expression(expression);
    match session.submit().await {
        SubmitOutcome::Evaluated(entry) => {
            println!("{}", entry.result());
            SUCCESS
        }
        // Already reported on stderr by the notifier.
        SubmitOutcome::Failed(_) => FAILED,
        SubmitOutcome::Ignored(IgnoreReason::BlankExpression) => {
            eprintln!("error: {}", ValidationError::Required);
            FAILED
        }
        SubmitOutcome::Ignored(IgnoreReason::Busy) => FAILED,
    }
}
