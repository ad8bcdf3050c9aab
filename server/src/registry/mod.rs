mod authority_entity;
mod authority_registry;

pub use authority_entity::AuthorityEntity;
pub use authority_registry::AuthorityRegistry;
