//! Sample reference pair handling.

use std::path::PathBuf;

use crate::error::RetoqueError;

/// Reference input/output photo pair sent as few-shot context with every
/// generation request.
#[derive(Debug, Clone)]
pub struct SampleBundle {
    pub reference_input: PathBuf,
    pub reference_output: PathBuf,
}

impl SampleBundle {
    fn validate(&self) -> Result<(), RetoqueError> {
        if !self.reference_input.is_file() {
            return Err(RetoqueError::NotFound(format!(
                "Sample input '{}' does not exist",
                self.reference_input.display()
            )));
        }
        if !self.reference_output.is_file() {
            return Err(RetoqueError::NotFound(format!(
                "Sample output '{}' does not exist",
                self.reference_output.display()
            )));
        }
        Ok(())
    }
}

/// Build the optional bundle from the CLI flags. Both must be supplied
/// together; supplying neither means no sample context.
pub fn build_sample_bundle(
    sample_input: Option<&str>,
    sample_output: Option<&str>,
) -> Result<Option<SampleBundle>, RetoqueError> {
    match (sample_input, sample_output) {
        (None, None) => Ok(None),
        (Some(input), Some(output)) => {
            let bundle = SampleBundle {
                reference_input: PathBuf::from(input),
                reference_output: PathBuf::from(output),
            };
            bundle.validate()?;
            Ok(Some(bundle))
        }
        _ => Err(RetoqueError::InvalidArgument(
            "Both --sample-input and --sample-output must be supplied".into(),
        )),
    }
}
