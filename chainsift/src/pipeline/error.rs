use derive_more::Display;

use super::provider::ProviderError;
use crate::checkpoints::CheckpointError;
use crate::repos::RepoError;

#[derive(Debug, Display)]
pub enum PipelineError {
    Repo(RepoError),
    Checkpoint(CheckpointError),
    Provider(ProviderError),
    UnknownEvent(String),
}

impl From<RepoError> for PipelineError {
    fn from(value: RepoError) -> Self {
        PipelineError::Repo(value)
    }
}

impl From<CheckpointError> for PipelineError {
    fn from(value: CheckpointError) -> Self {
        PipelineError::Checkpoint(value)
    }
}

impl From<ProviderError> for PipelineError {
    fn from(value: ProviderError) -> Self {
        PipelineError::Provider(value)
    }
}
