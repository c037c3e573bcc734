// Adapters layer: concrete implementations for external systems (http, pet sources, storage).

pub mod http;
pub mod petfinder;
pub mod petharbor;
pub mod storage;

pub use http::ReqwestTransport;
pub use petfinder::PetFinderSource;
pub use petharbor::PetHarborSource;
pub use storage::LocalStorage;
