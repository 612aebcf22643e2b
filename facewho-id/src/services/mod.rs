//! Face recognition provider clients
//!
//! Three clients share one `FaceApiConnection`:
//! - `DetectionClient` (detect)
//! - `IdentificationClient` (identify)
//! - `PersonDirectoryClient` (person group lookup)

pub mod detection_client;
pub mod face_api;
pub mod identification_client;
pub mod person_directory_client;
pub mod provider;

pub use detection_client::DetectionClient;
pub use face_api::FaceApiConnection;
pub use identification_client::IdentificationClient;
pub use person_directory_client::PersonDirectoryClient;
pub use provider::{FaceProvider, IdentityProvider, PersonDirectory, ProviderError};
