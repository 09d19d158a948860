//! Remote sandboxed execution via the Piston wire protocol

pub mod sandbox;

pub use sandbox::SandboxClient;
