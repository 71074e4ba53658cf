#[cfg(not(feature = "memory"))]
compile_error!("Enable a repo feature: `memory`.");

#[cfg(feature = "memory")]
pub mod memory;

/// The storage backend selected by the enabled feature.
#[cfg(feature = "memory")]
pub type Repo = memory::InMemoryRepo;

#[cfg(feature = "memory")]
pub fn build_repo() -> Repo {
    memory::InMemoryRepo::new()
}
