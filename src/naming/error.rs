use crate::container::ContainerID;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not find a sane name for container `{container_id}`")]
    NoNameResolved { container_id: ContainerID },
}

pub type Result<T> = std::result::Result<T, Error>;
