pub mod upload_signer;

pub use upload_signer::{SignatureError, UploadSigner};
