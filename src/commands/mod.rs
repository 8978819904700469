pub mod doc;
pub mod fingerprint;
pub mod import;
pub mod settings;
pub mod suggest;
pub mod utils;
pub mod verify;
